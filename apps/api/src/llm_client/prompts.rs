// Cross-cutting prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for markdown-only outputs (cover letters,
/// improved resume sections). No preamble, no commentary.
pub const MARKDOWN_ONLY_SYSTEM: &str = "You are an expert career writing assistant. \
    Respond with the requested markdown content only. \
    Do NOT include any introduction, notes, or explanation around it.";
