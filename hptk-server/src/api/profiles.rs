//! Music profile viewer endpoint

use axum::{extract::rejection::JsonRejection, Json};
use hptk_profile::{parse_profile, ProfileBatch};
use tracing::info;

use super::UploadBatch;
use crate::error::{ApiError, ApiResult};

/// POST /api/profiles/parse
///
/// Parses each uploaded `.djv`/`.olp` file and splits the records into normal
/// profiles and overlays. Unparseable content still yields a record.
pub async fn parse_profiles(
    payload: Result<Json<UploadBatch>, JsonRejection>,
) -> ApiResult<Json<ProfileBatch>> {
    let Json(batch) = payload?;
    if batch.files.is_empty() {
        return Err(ApiError::BadRequest("At least one file is required".to_string()));
    }

    let result = ProfileBatch::from_records(
        batch
            .files
            .iter()
            .map(|file| parse_profile(&file.content, &file.file_name)),
    );

    info!(
        normal = result.normal_count,
        overlays = result.overlay_count,
        "Parsed profile batch"
    );

    Ok(Json(result))
}
