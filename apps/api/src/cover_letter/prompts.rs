/// Prompt for drafting a cover letter from the job posting and the caller's
/// profile. Output is markdown, ready for display.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"
Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Industry: {industry}
- Years of experience: {experience}
- Skills: {skills}
- Professional background: {bio}

Job description:
{job_description}

Requirements:
1. Use a professional, enthusiastic tone
2. Highlight relevant skills and experience
3. Show understanding of the company's needs
4. Keep it concise (max 400 words)
5. Use proper business letter formatting in markdown
6. Include specific examples of achievements
7. Relate the candidate's background to the job requirements

Format the letter in markdown, with no text before or after it.
"#;
