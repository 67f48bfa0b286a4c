// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// only cross-cutting pieces live here.

/// Closing instruction for every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Grounding rule for any prompt that describes a real person.
pub const NO_FABRICATION_INSTRUCTION: &str = "Base every statement on the profile data provided. \
    If something is not in the data, say so rather than guessing. Never fabricate details.";
