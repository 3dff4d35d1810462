//! Mapping of chat client failures onto API errors

use axum::http::StatusCode;
use tracing::error;

use crate::error::ApiError;
use crate::services::ChatError;

/// Client-facing messages for one proxied service
pub(crate) struct ServiceMessages {
    pub service: &'static str,
    /// Sent with the upstream's own status when it rejects the call
    pub upstream_failed: &'static str,
    /// Sent with 500 when the upstream answers without content
    pub no_content: &'static str,
}

pub(crate) const INTERNAL_ERROR: &str = "Internal server error";

pub(crate) fn map_chat_error(err: ChatError, messages: &ServiceMessages) -> ApiError {
    match err {
        ChatError::Api(status, body) => {
            error!(
                service = messages.service,
                status,
                body = %body,
                "Upstream rejected chat completion"
            );
            ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: messages.upstream_failed.to_string(),
            }
        }
        ChatError::EmptyResponse => {
            error!(service = messages.service, "Upstream returned no content");
            ApiError::Internal(messages.no_content.to_string())
        }
        other => {
            error!(service = messages.service, error = %other, "Chat completion failed");
            ApiError::Internal(INTERNAL_ERROR.to_string())
        }
    }
}
