//! hptk-server library - support toolkit HTTP service
//!
//! Serves the tool pages, the profile/log parsing endpoints, the replacement
//! form generator and the two chat-completion proxies (translate, draft).

use axum::{extract::DefaultBodyLimit, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod services;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

use services::{ChatClient, ChatError};

/// Uploaded profile and log batches can be large
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Upstream credentials, one per proxied service
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub translate: Option<String>,
    pub drafter: Option<String>,
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion client shared by both proxies
    pub chat: Arc<ChatClient>,
    pub credentials: Arc<Credentials>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, ChatError> {
        let chat = ChatClient::new(
            &config.upstream_base_url,
            &config.upstream_model,
            config.upstream_timeout,
        )?;

        Ok(Self {
            chat: Arc::new(chat),
            credentials: Arc::new(Credentials {
                translate: config.translate_api_key.clone(),
                drafter: config.drafter_api_key.clone(),
            }),
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::health_routes())
        .merge(api::info_routes())
        .merge(api::parse_routes())
        .merge(api::proxy_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
