//! Error types for fishid.
//!
//! Errors are split by concern so that callers can decide which ones surface
//! to clients (upload validation), which ones degrade into a placeholder
//! record (model invocation), and which ones abort startup (configuration).

use thiserror::Error;

/// Top-level error type for fishid operations.
#[derive(Error, Debug)]
pub enum FishIdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External model call failed
    #[error("Invocation error: {0}")]
    Invocation(#[from] InvocationError),

    /// Uploaded image was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures of a call to the external generative model.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout)
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    /// The provider answered with a non-success status
    #[error("{provider} HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the provider's schema
    #[error("Failed to parse {provider} response: {message}")]
    Parse { provider: String, message: String },

    /// The provider answered but generated no text
    #[error("{provider} returned empty response, no text content generated")]
    EmptyResponse { provider: String },

    /// Provider is unknown or missing credentials
    #[error("{0}")]
    NotConfigured(String),

    /// No answer within the configured limit
    #[error("Model call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl InvocationError {
    /// HTTP status reported by the provider, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            InvocationError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Rejections of an uploaded image before the model is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Upload carried no bytes
    #[error("Uploaded file is empty")]
    Empty,

    /// Upload exceeds the configured size limit
    #[error("File too large ({size_bytes} bytes exceeds the {max_mb}MB limit)")]
    TooLarge { size_bytes: u64, max_mb: u64 },

    /// Declared or sniffed type is not on the allow-list
    #[error("Only JPEG or PNG images are allowed (got {content_type})")]
    UnsupportedType { content_type: String },

    /// Multipart form had no file field
    #[error("No file uploaded. Use field name 'file'.")]
    MissingFile,
}

/// Convenience type alias for fishid results.
pub type Result<T> = std::result::Result<T, FishIdError>;
