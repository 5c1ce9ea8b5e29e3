//! LLM provider trait and request/response types.
//!
//! Defines the interface that all LLM providers implement, the two fixed
//! prompts fishid sends, and the factory that creates the right provider
//! from CLI flags and config.

use crate::config::LlmConfig;
use crate::error::InvocationError;
use crate::types::ImageFormat;
use async_trait::async_trait;
use base64::Engine;

/// Classification prompt. Constant across calls; only the image varies.
pub const CLASSIFY_PROMPT: &str = r#"You are an expert ichthyologist (fish expert).
Look at the provided image and classify the fish if present.

Return ONLY JSON in this format:

{
  "fish_type": "If fish found, name it. If none, return 'Unknown'",
  "description": "Short description of the fish OR why none detected",
  "habitat": "Likely habitat OR 'Unknown'",
  "edibility": "Edible/Not edible/Unknown"
}"#;

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and their format.
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: format.mime_type().to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A single generation request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Image to attach; `None` for text-only prompts
    pub image: Option<ImageInput>,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl LlmRequest {
    /// Build the fish classification request for an image.
    pub fn classify_fish(image: ImageInput) -> Self {
        Self {
            image: Some(image),
            prompt: CLASSIFY_PROMPT.to_string(),
            max_tokens: 512,
            temperature: 0.2,
        }
    }

    /// Build the text-only request for facts about a species.
    pub fn species_facts(species: &str) -> Self {
        Self {
            image: None,
            prompt: format!("Write interesting facts about {species} fish."),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// The response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text, unmodified apart from trimming
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "gemini", "ollama").
    fn name(&self) -> &str;

    /// Check whether the provider is configured and reachable.
    async fn is_available(&self) -> bool;

    /// Send the request and return the raw generated text.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, InvocationError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Provider names accepted by [`LlmProviderFactory::create`].
pub const PROVIDERS: &[&str] = &["gemini", "openai", "anthropic", "ollama"];

/// Factory that creates the appropriate provider from CLI flags and config.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider based on provider name, config, and optional model override.
    ///
    /// Fails when the provider is unknown or its API key cannot be resolved,
    /// so callers that build the provider at startup fail fast.
    ///
    /// # Arguments
    /// * `provider` - Provider identifier ("gemini", "openai", "anthropic", "ollama")
    /// * `config` - The full LLM config section
    /// * `model_override` - Optional model name that overrides the config default
    pub fn create(
        provider: &str,
        config: &LlmConfig,
        model_override: Option<&str>,
    ) -> Result<Box<dyn LlmProvider>, InvocationError> {
        match provider {
            "gemini" => {
                let cfg = config.gemini.clone().unwrap_or_default();
                let api_key = require_key(&cfg.api_key, "Gemini", "GEMINI_API_KEY")?;
                let model = model_override.map(String::from).unwrap_or(cfg.model);
                Ok(Box::new(super::gemini::GeminiProvider::new(
                    &cfg.endpoint,
                    &api_key,
                    &model,
                )))
            }
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = require_key(&cfg.api_key, "OpenAI", "OPENAI_API_KEY")?;
                let model = model_override.map(String::from).unwrap_or(cfg.model);
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &cfg.endpoint,
                    &api_key,
                    &model,
                )))
            }
            "anthropic" => {
                let cfg = config.anthropic.clone().unwrap_or_default();
                let api_key = require_key(&cfg.api_key, "Anthropic", "ANTHROPIC_API_KEY")?;
                let model = model_override.map(String::from).unwrap_or(cfg.model);
                Ok(Box::new(super::anthropic::AnthropicProvider::new(
                    &cfg.endpoint,
                    &api_key,
                    &model,
                )))
            }
            "ollama" => {
                let cfg = config.ollama.clone().unwrap_or_default();
                let model = model_override.map(String::from).unwrap_or(cfg.model);
                Ok(Box::new(super::ollama::OllamaProvider::new(
                    &cfg.endpoint,
                    &model,
                )))
            }
            other => Err(InvocationError::NotConfigured(format!(
                "Unknown LLM provider: {other} (expected one of: {})",
                PROVIDERS.join(", ")
            ))),
        }
    }
}

fn require_key(raw: &str, label: &str, env_hint: &str) -> Result<String, InvocationError> {
    resolve_env_var(raw).ok_or_else(|| {
        InvocationError::NotConfigured(format!(
            "{label} API key not set. Set {env_hint} env var."
        ))
    })
}
