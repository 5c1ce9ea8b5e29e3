//! LLM integration for fish classification.
//!
//! Provides a provider abstraction over multiple LLM backends (Gemini, OpenAI,
//! Anthropic, Ollama) and the classifier that turns their output into
//! [`ClassificationRecord`](crate::types::ClassificationRecord)s.

pub(crate) mod anthropic;
pub(crate) mod classifier;
pub(crate) mod gemini;
pub(crate) mod ollama;
pub(crate) mod openai;
pub(crate) mod provider;

pub use classifier::{ClassifyOptions, Classifier};
pub use provider::{
    ImageInput, LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse, CLASSIFY_PROMPT,
    PROVIDERS,
};
