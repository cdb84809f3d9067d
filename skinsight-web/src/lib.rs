//! skinsight-web library - skin lesion classification web service
//!
//! Browser clients move between five pages under a per-client navigation
//! state machine. Signed-in users can upload a lesion photo and get the
//! three most likely diagnoses from a trained classifier.

use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod accounts;
pub mod api;
pub mod classify;
pub mod diseases;
pub mod error;
pub mod session;
pub mod ui;

use accounts::AccountService;
use classify::{ClassificationPipeline, UploadStaging};
use session::SessionRegistry;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live client sessions
    pub sessions: SessionRegistry,
    /// Sign Up / Log In over the credential store
    pub accounts: Arc<AccountService>,
    /// Preprocess, infer, rank
    pub pipeline: Arc<ClassificationPipeline>,
    /// Where uploads wait for prediction
    pub uploads: Arc<UploadStaging>,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(
        sessions: SessionRegistry,
        accounts: AccountService,
        pipeline: ClassificationPipeline,
        uploads: UploadStaging,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            sessions,
            accounts: Arc::new(accounts),
            pipeline: Arc::new(pipeline),
            uploads: Arc::new(uploads),
            max_upload_bytes,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let pages = Router::new()
        .route("/", get(api::show_page))
        .route("/nav/:page", post(api::navigate))
        .route("/sign-up", post(api::sign_up))
        .route("/log-in", post(api::log_in))
        .route("/log-out", post(api::log_out))
        .route("/check-disease/upload", post(api::upload_image))
        .route("/check-disease/predict", post(api::predict));

    let service = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    let body_limit = state.max_upload_bytes;

    Router::new()
        .merge(pages)
        .merge(service)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
