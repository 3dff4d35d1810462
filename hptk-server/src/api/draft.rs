//! Email drafter proxy

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::upstream::{map_chat_error, ServiceMessages};
use crate::error::{ApiError, ApiResult};
use crate::services::prompts::{self, DraftOptions, DraftPrompt};
use crate::AppState;

const MESSAGES: ServiceMessages = ServiceMessages {
    service: "draft",
    upstream_failed: "Email drafting service error",
    no_content: "No email draft received",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode {
    /// Answer a client message
    Reply,
    /// Start a fresh email
    #[default]
    New,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default)]
    pub mode: DraftMode,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

impl DraftRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.instructions.trim().is_empty() {
            return Err(ApiError::BadRequest("Instructions are required".to_string()));
        }
        if self.mode == DraftMode::Reply && self.client_email().is_none() {
            return Err(ApiError::BadRequest(
                "Client email is required for reply mode".to_string(),
            ));
        }
        Ok(())
    }

    fn client_email(&self) -> Option<&str> {
        self.client_email.as_deref().filter(|e| !e.trim().is_empty())
    }

    fn prompt(&self) -> DraftPrompt<'_> {
        DraftPrompt {
            client_email: match self.mode {
                DraftMode::Reply => self.client_email(),
                DraftMode::New => None,
            },
            instructions: &self.instructions,
            tone: or_default(&self.tone, prompts::DEFAULT_TONE),
            language: or_default(&self.language, prompts::DEFAULT_LANGUAGE),
            length: or_default(&self.length, prompts::DEFAULT_LENGTH),
        }
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'static str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: String,
}

/// POST /api/draft
pub async fn draft_email(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> ApiResult<Json<DraftResponse>> {
    let Some(api_key) = state.credentials.drafter.as_deref() else {
        error!("{} is not configured", hptk_common::config::DRAFTER_KEY_ENV);
        return Err(ApiError::MissingCredential(
            "Drafter API key not configured".to_string(),
        ));
    };

    let Json(request) = payload?;
    request.validate()?;

    let prompt = request.prompt();
    info!(
        mode = ?request.mode,
        tone = prompt.tone,
        language = prompt.language,
        length = prompt.length,
        "Email draft requested"
    );

    let draft = state
        .chat
        .complete(api_key, &prompt.into_request())
        .await
        .map_err(|e| map_chat_error(e, &MESSAGES))?;

    Ok(Json(DraftResponse { draft }))
}

/// GET /api/draft/options
pub async fn get_draft_options() -> Json<DraftOptions> {
    Json(prompts::draft_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> DraftRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let req = request(r#"{"instructions":"Say hi"}"#);
        assert_eq!(req.mode, DraftMode::New);
        req.validate().unwrap();

        let prompt = req.prompt();
        assert_eq!(prompt.tone, prompts::DEFAULT_TONE);
        assert_eq!(prompt.language, prompts::DEFAULT_LANGUAGE);
        assert_eq!(prompt.length, prompts::DEFAULT_LENGTH);
        assert!(prompt.client_email.is_none());
    }

    #[test]
    fn test_new_mode_ignores_client_email() {
        let req = request(r#"{"mode":"new","clientEmail":"old thread","instructions":"x"}"#);
        assert!(req.prompt().client_email.is_none());
    }

    #[test]
    fn test_reply_requires_client_email() {
        let req = request(r#"{"mode":"reply","clientEmail":"  ","instructions":"x"}"#);
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Client email is required for reply mode");

        let req = request(r#"{"mode":"reply","clientEmail":"Hello","instructions":"x"}"#);
        req.validate().unwrap();
        assert_eq!(req.prompt().client_email, Some("Hello"));
    }

    #[test]
    fn test_instructions_checked_first() {
        let req = request(r#"{"mode":"reply"}"#);
        assert_eq!(req.validate().unwrap_err().to_string(), "Instructions are required");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(serde_json::from_str::<DraftRequest>(r#"{"mode":"forward"}"#).is_err());
    }
}
