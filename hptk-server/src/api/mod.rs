//! HTTP API handlers for hptk-server

pub mod buildinfo;
pub mod draft;
pub mod health;
pub mod profiles;
pub mod replacement;
pub mod tools;
pub mod tracks;
pub mod translate;
pub mod ui;

mod upstream;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::AppState;

pub use buildinfo::get_build_info;
pub use draft::{draft_email, get_draft_options};
pub use health::health_routes;
pub use profiles::parse_profiles;
pub use replacement::build_replacement_form;
pub use tools::list_tools;
pub use tracks::extract_tracks;
pub use translate::translate;
pub use ui::{serve_index, serve_tool_page};

/// One uploaded text file, as sent by the profile viewer and track extractor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    #[serde(default)]
    pub content: String,
}

/// Batch of uploaded files
#[derive(Debug, Clone, Deserialize)]
pub struct UploadBatch {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// Tool pages
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(serve_index))
        .route("/tools/:id", get(serve_tool_page))
}

/// Read-only metadata endpoints
pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/api/buildinfo", get(get_build_info))
        .route("/api/tools", get(list_tools))
        .route("/api/draft/options", get(get_draft_options))
}

/// Local parsing and form generation, no upstream involved
pub fn parse_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profiles/parse", post(parse_profiles))
        .route("/api/tracks/extract", post(extract_tracks))
        .route("/api/replacement-form", post(build_replacement_form))
}

/// Chat-completion proxies
pub fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/draft", post(draft_email))
}
