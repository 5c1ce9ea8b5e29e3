//! fishid core - fish species identification via multimodal LLMs.
//!
//! Takes an image, asks an external generative model to classify the fish in
//! it, and turns whatever text comes back into a fixed four-field record.
//!
//! # Architecture
//!
//! ```text
//! Upload → Validate (JPEG/PNG) → Provider (Gemini, OpenAI, ...) → Normalize → ClassificationRecord
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fishid_core::{Classifier, ClassifyOptions, Config, ImageFormat, LlmProviderFactory};
//!
//! #[tokio::main]
//! async fn main() -> fishid_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = LlmProviderFactory::create(&config.llm.provider, &config.llm, None)?;
//!     let classifier = Classifier::new(provider, ClassifyOptions::default());
//!
//!     let bytes = std::fs::read("./trout.jpg")?;
//!     let record = classifier.classify(&bytes, ImageFormat::Jpeg).await;
//!     println!("{}: {}", record.fish_type, record.habitat);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;
pub mod normalize;
pub mod types;
pub mod upload;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FishIdError, InvocationError, Result, ValidationError};
pub use llm::{Classifier, ClassifyOptions, LlmProvider, LlmProviderFactory};
pub use normalize::normalize;
pub use types::{ClassificationRecord, ImageFormat, SpeciesFacts};
pub use upload::UploadValidator;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
