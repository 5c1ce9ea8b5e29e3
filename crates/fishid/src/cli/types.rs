//! CLI enum types shared by commands.

use clap::ValueEnum;

/// Supported LLM providers.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LlmProvider {
    /// Google Gemini API
    Gemini,
    /// OpenAI API (or any Chat Completions compatible server)
    Openai,
    /// Anthropic API
    Anthropic,
    /// Local Ollama instance
    Ollama,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::Openai => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}
