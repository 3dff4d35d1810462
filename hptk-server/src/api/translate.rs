//! Translator proxy
//!
//! Mandarin / English / Thai: the upstream model detects the dominant input
//! language and returns the other two, one per line.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::upstream::{map_chat_error, ServiceMessages};
use crate::error::{ApiError, ApiResult};
use crate::services::prompts;
use crate::AppState;

const MESSAGES: ServiceMessages = ServiceMessages {
    service: "translate",
    upstream_failed: "Translation service error",
    no_content: "No translation received",
};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// POST /api/translate
///
/// The credential is checked before the body is read, so a misconfigured
/// server answers 500 for every request.
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> ApiResult<Json<TranslateResponse>> {
    let Some(api_key) = state.credentials.translate.as_deref() else {
        error!("{} is not configured", hptk_common::config::TRANSLATE_KEY_ENV);
        return Err(ApiError::MissingCredential("API key not configured".to_string()));
    };

    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    info!(chars = request.text.chars().count(), "Translation requested");

    let translation = state
        .chat
        .complete(api_key, &prompts::translation_request(&request.text))
        .await
        .map_err(|e| map_chat_error(e, &MESSAGES))?;

    Ok(Json(TranslateResponse { translation }))
}
