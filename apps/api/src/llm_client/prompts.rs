// Shared prompt fragments. Each service that needs completions defines its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction shared by every prompt that asks for labelled plain-text fields.
pub const PLAIN_TEXT_FIELDS_INSTRUCTION: &str = "\
    Answer with one `Label: value` line per field, in the order given. \
    Write values as plain text, never as JSON or arrays. \
    Leave a value empty when the description does not support it.";
