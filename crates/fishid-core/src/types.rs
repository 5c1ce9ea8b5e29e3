//! Core data types returned by fishid.

use serde::{Deserialize, Serialize};

/// Sentinel used for any field the model could not determine.
pub const UNKNOWN: &str = "Unknown";

/// Default description when the model omits one.
pub const NO_DESCRIPTION: &str = "No description available.";

/// The four-field classification result.
///
/// All fields are always populated. Instances come from
/// [`normalize`](crate::normalize::normalize) or
/// [`ClassificationRecord::failure`], never from partial construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Species name, or "Unknown"
    pub fish_type: String,

    /// Free text; holds the error text when classification failed
    pub description: String,

    /// Likely habitat, or "Unknown"
    pub habitat: String,

    /// "Edible", "Not edible" or "Unknown" by convention (not enforced)
    pub edibility: String,
}

impl ClassificationRecord {
    /// Placeholder record returned when the model call could not complete.
    pub fn failure(reason: impl std::fmt::Display) -> Self {
        Self {
            fish_type: UNKNOWN.to_string(),
            description: format!("Error: {reason}"),
            habitat: UNKNOWN.to_string(),
            edibility: UNKNOWN.to_string(),
        }
    }
}

/// Free-text facts about a species, as returned by `/facts/{species}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesFacts {
    pub species: String,
    pub facts: String,
}

/// Image formats accepted for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// MIME type sent to the model alongside the image bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Resolve a MIME type to a supported format.
    ///
    /// Comparison is case-insensitive and ignores parameters such as `; charset=`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Resolve a file extension (without the dot) to a supported format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Jpeg => write!(f, "jpeg"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}
