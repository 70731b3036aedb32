/// Prompt for generating a mock interview quiz. `{skills_clause}` is either
/// empty or "with expertise in <skills>".
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"
Generate 10 technical interview questions for a {industry} professional{skills_clause}.

Each question should be multiple choice with exactly 4 options.

Return ONLY the following JSON, no additional text:
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correct_answer": "string",
      "explanation": "string"
    }
  ]
}

The correct_answer must be copied verbatim from the options array.
"#;

pub const QUIZ_SYSTEM: &str = "You are an experienced technical interviewer. \
    You MUST respond with valid JSON only, with no text outside the JSON object \
    and no markdown code fences.";

pub const TIP_SYSTEM: &str = "You are a supportive technical interview coach. \
    Respond with the requested tip as plain text only, with no preamble or formatting.";

/// Prompt for a single improvement tip after an imperfect quiz. `{mistakes}`
/// is a list of the questions the user missed with their wrong answers.
pub const IMPROVEMENT_TIP_PROMPT_TEMPLATE: &str = r#"
The user got the following {industry} technical interview questions wrong:

{mistakes}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by the wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't mention the mistakes explicitly; focus on what to learn or practice.
Return the tip as plain text, nothing else.
"#;
