//! Replacement form endpoint

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::forms::{ReplacementRequest, ReplacementTable};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementFormResponse {
    #[serde(flatten)]
    pub table: ReplacementTable,
    pub plain_text: String,
    pub html: String,
}

/// POST /api/replacement-form
pub async fn build_replacement_form(
    payload: Result<Json<ReplacementRequest>, JsonRejection>,
) -> ApiResult<Json<ReplacementFormResponse>> {
    let Json(request) = payload?;
    let table = ReplacementTable::from_request(&request);

    if let Some(model) = table.detected_model {
        tracing::debug!(serial = %request.player_id, model, "Detected player model");
    }

    Ok(Json(ReplacementFormResponse {
        plain_text: table.to_plain_text(),
        html: table.to_html(),
        table,
    }))
}
