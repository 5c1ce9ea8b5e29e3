//! Upload validation before the model is invoked.

use crate::config::LimitsConfig;
use crate::error::ValidationError;
use crate::types::ImageFormat;

/// Content type browsers and HTTP clients send when they don't know better.
const OCTET_STREAM: &str = "application/octet-stream";

/// Validates uploaded images against the JPEG/PNG allow-list and size limit.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    limits: LimitsConfig,
}

impl UploadValidator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_bytes(&self) -> usize {
        usize::try_from(self.limits.max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Check an upload and resolve its image format.
    ///
    /// Checks:
    /// - Body is non-empty and within the size limit
    /// - Declared content type is JPEG or PNG
    /// - When no useful type is declared, magic bytes identify JPEG or PNG
    pub fn validate(
        &self,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<ImageFormat, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::Empty);
        }

        if bytes.len() > self.max_bytes() {
            return Err(ValidationError::TooLarge {
                size_bytes: bytes.len() as u64,
                max_mb: self.limits.max_upload_mb,
            });
        }

        match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
            Some(ct) if !ct.eq_ignore_ascii_case(OCTET_STREAM) => {
                ImageFormat::from_mime(ct).ok_or_else(|| ValidationError::UnsupportedType {
                    content_type: ct.to_string(),
                })
            }
            declared => sniff(bytes).ok_or_else(|| ValidationError::UnsupportedType {
                content_type: declared.unwrap_or("unknown").to_string(),
            }),
        }
    }
}

/// Identify JPEG or PNG from the file header.
pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }

    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some(ImageFormat::Png);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn validator() -> UploadValidator {
        UploadValidator::new(LimitsConfig::default())
    }

    #[test]
    fn test_declared_jpeg_accepted() {
        assert_eq!(validator().validate(Some("image/jpeg"), JPEG), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn test_declared_png_accepted() {
        assert_eq!(validator().validate(Some("image/png"), PNG), Ok(ImageFormat::Png));
    }

    #[test]
    fn test_declared_type_wins_over_bytes() {
        // The declared type is authoritative; the model sees what the client said.
        assert_eq!(validator().validate(Some("image/png"), JPEG), Ok(ImageFormat::Png));
    }

    #[test]
    fn test_unsupported_declared_type_rejected() {
        let err = validator().validate(Some("text/plain"), b"hello").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedType {
                content_type: "text/plain".to_string()
            }
        );
    }

    #[test]
    fn test_gif_rejected() {
        let err = validator().validate(Some("image/gif"), b"GIF89a").unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn test_octet_stream_is_sniffed() {
        assert_eq!(
            validator().validate(Some("application/octet-stream"), PNG),
            Ok(ImageFormat::Png)
        );
        let err = validator()
            .validate(Some("application/octet-stream"), b"not an image")
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn test_missing_type_is_sniffed() {
        assert_eq!(validator().validate(None, JPEG), Ok(ImageFormat::Jpeg));
        assert_eq!(validator().validate(Some("  "), PNG), Ok(ImageFormat::Png));
        let err = validator().validate(None, b"plain text").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedType {
                content_type: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_empty_body_rejected() {
        assert_eq!(
            validator().validate(Some("image/jpeg"), &[]),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_oversized_body_rejected() {
        let validator = UploadValidator::new(LimitsConfig {
            max_upload_mb: 1,
            ..LimitsConfig::default()
        });
        let mut bytes = JPEG.to_vec();
        bytes.resize(2 * 1024 * 1024, 0);
        let err = validator.validate(Some("image/jpeg"), &bytes).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                size_bytes: 2 * 1024 * 1024,
                max_mb: 1
            }
        );
    }

    #[test]
    fn test_barely_oversized_body_reports_exact_size() {
        let validator = UploadValidator::new(LimitsConfig {
            max_upload_mb: 1,
            ..LimitsConfig::default()
        });
        let mut bytes = JPEG.to_vec();
        bytes.resize(1024 * 1024 + 1, 0);
        let err = validator.validate(Some("image/jpeg"), &bytes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File too large (1048577 bytes exceeds the 1MB limit)"
        );
    }

    #[test]
    fn test_sniff_rejects_short_or_unknown_headers() {
        assert_eq!(sniff(&[0xFF, 0xD8]), None);
        assert_eq!(sniff(b"RIFF0000WEBP"), None);
        assert_eq!(sniff(&[]), None);
    }
}
