//! Classification service: provider call, timeout, normalization.
//!
//! The classifier is the only thing the HTTP layer talks to. It never returns
//! an error: model failures degrade to a placeholder record (or an
//! `"Error: ..."` facts string) so clients always get a well-formed body.

use super::provider::{ImageInput, LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse};
use crate::config::Config;
use crate::error::InvocationError;
use crate::normalize::normalize;
use crate::types::{ClassificationRecord, ImageFormat, SpeciesFacts};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the classifier.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Upper bound on a single model call in milliseconds
    pub timeout_ms: u64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { timeout_ms: 60_000 }
    }
}

/// Runs the model adapter and response normalizer for each request.
///
/// Holds no mutable state; share it across requests behind an `Arc`.
pub struct Classifier {
    provider: Arc<dyn LlmProvider>,
    options: ClassifyOptions,
}

impl Classifier {
    pub fn new(provider: Box<dyn LlmProvider>, options: ClassifyOptions) -> Self {
        Self {
            provider: Arc::from(provider),
            options,
        }
    }

    /// Build a classifier from configuration, creating the named provider.
    ///
    /// `provider` and `model_override` take precedence over `config.llm`.
    /// Fails if the provider is unknown or its credentials are missing.
    pub fn from_config(
        config: &Config,
        provider: Option<&str>,
        model_override: Option<&str>,
    ) -> crate::Result<Self> {
        let name = provider.unwrap_or(&config.llm.provider);
        tracing::debug!("Initializing {name} provider (fishid v{})", crate::VERSION);
        let provider = LlmProviderFactory::create(name, &config.llm, model_override)?;
        Ok(Self::new(
            provider,
            ClassifyOptions {
                timeout_ms: config.limits.llm_timeout_ms,
            },
        ))
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether the underlying provider is configured and reachable.
    pub async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }

    /// Classify the fish in an image.
    ///
    /// Input bytes are expected to be validated already (non-empty, allowed format).
    pub async fn classify(&self, image_bytes: &[u8], format: ImageFormat) -> ClassificationRecord {
        let request = LlmRequest::classify_fish(ImageInput::from_bytes(image_bytes, format));

        match self.invoke(&request).await {
            Ok(response) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    tokens_used = ?response.tokens_used,
                    "Model response: {}",
                    response.text
                );
                normalize(&response.text)
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), "Classification failed: {e}");
                ClassificationRecord::failure(e)
            }
        }
    }

    /// Generate free-text facts about a species.
    ///
    /// The model text is returned as-is; on failure `facts` carries the error.
    pub async fn facts(&self, species: &str) -> SpeciesFacts {
        let request = LlmRequest::species_facts(species);

        let facts = match self.invoke(&request).await {
            Ok(response) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    tokens_used = ?response.tokens_used,
                    "Facts generated for {species:?}"
                );
                response.text
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), "Facts generation failed: {e}");
                format!("Error: {e}")
            }
        };

        SpeciesFacts {
            species: species.to_string(),
            facts,
        }
    }

    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, InvocationError> {
        let timeout_ms = self.options.timeout_ms;
        match tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.provider.generate(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(InvocationError::Timeout { timeout_ms }),
        }
    }
}
