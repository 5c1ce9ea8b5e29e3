//! Endpoint handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use fishid_core::{ClassificationRecord, SpeciesFacts, ValidationError};
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// A file read out of a multipart form.
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Classify the fish in an uploaded image.
///
/// # Request
/// `multipart/form-data` with a `file` field holding a JPEG or PNG image.
///
/// # Returns
/// - 200 OK with a `ClassificationRecord`, including when the model call
///   fails (`fish_type` is "Unknown" and `description` holds the error)
/// - 400 Bad Request for missing, empty, or non-JPEG/PNG uploads
/// - 413 Payload Too Large when the upload exceeds `limits.max_upload_mb`
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassificationRecord>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let upload = read_file_field(&mut multipart).await?;

    let format = state
        .validator
        .validate(upload.content_type.as_deref(), &upload.bytes)?;

    tracing::info!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        size = upload.bytes.len(),
        %format,
        "Classifying upload"
    );

    let record = state.classifier.classify(&upload.bytes, format).await;
    Ok(Json(record))
}

/// Free-text facts about a species. The model text is returned unmodified.
pub async fn facts(
    State(state): State<AppState>,
    Path(species): Path<String>,
) -> Json<SpeciesFacts> {
    tracing::info!(species = %species, "Generating facts");
    Json(state.classifier.facts(&species).await)
}

/// Liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": fishid_core::VERSION,
        "provider": state.classifier.provider_name(),
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(e.body_text())
            } else {
                ApiError::BadRequest(format!("Failed to read file data: {e}"))
            }
        })?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ValidationError::MissingFile.into())
}
