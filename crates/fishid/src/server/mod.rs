//! HTTP surface: router, shared state, and middleware.

mod error;
mod handlers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use fishid_core::{Classifier, UploadValidator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// State shared by all handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub validator: Arc<UploadValidator>,
}

impl AppState {
    pub fn new(classifier: Classifier, validator: UploadValidator) -> Self {
        Self {
            classifier: Arc::new(classifier),
            validator: Arc::new(validator),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.validator.max_bytes().saturating_add(MULTIPART_OVERHEAD);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/facts/:species", get(handlers::facts))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
