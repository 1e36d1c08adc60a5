//! Provider inference from model identifiers.

const FREE_SUFFIX: &str = " (free)";
const FALLBACK_PROVIDER: &str = "google";

const PREFIXES: &[(&str, &str)] = &[
    ("google/", "google"),
    ("groq/", "groq"),
    ("openrouter/", "openrouter"),
    ("openai/", "openai"),
    ("anthropic/", "anthropic"),
    ("deepseek/", "deepseek"),
    ("mistral/", "mistral"),
    ("xai/", "xai"),
    ("huggingface/", "huggingface"),
    ("ollama/", "ollama"),
];

const HINTS: &[(&str, &str)] = &[
    ("gemini", "google"),
    ("groq", "groq"),
    ("llama", "groq"),
    ("mixtral", "groq"),
    ("gpt", "openai"),
    ("claude", "anthropic"),
    ("deepseek", "deepseek"),
    ("mistral", "mistral"),
    ("codestral", "mistral"),
    ("grok", "xai"),
];

/// Guess the provider that serves `model_id`.
///
/// All `provider/` prefixes are tried before any substring hint, on purpose:
/// `ollama/llama3` is `ollama` and not `groq`, even though an interleaved
/// check would say otherwise. Anything unrecognised falls back to `google`.
pub fn detect_provider(model_id: &str) -> &'static str {
    let lowered = model_id.to_lowercase();
    let m = lowered.trim().trim_end_matches(FREE_SUFFIX).trim();

    PREFIXES
        .iter()
        .find(|(prefix, _)| m.starts_with(prefix))
        .or_else(|| HINTS.iter().find(|(hint, _)| m.contains(hint)))
        .map(|(_, provider)| *provider)
        .unwrap_or(FALLBACK_PROVIDER)
}
