//! Track extractor endpoint

use axum::{extract::rejection::JsonRejection, Json};
use hptk_profile::{extract_log, LogExtractionResult};
use serde::Serialize;
use tracing::info;

use super::UploadBatch;
use crate::error::{ApiError, ApiResult};

/// One log's tracks plus the two copyable listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackLogView {
    #[serde(flatten)]
    pub result: LogExtractionResult,
    pub simple_listing: String,
    pub timestamped_listing: String,
}

impl From<LogExtractionResult> for TrackLogView {
    fn from(result: LogExtractionResult) -> Self {
        Self {
            simple_listing: result.simple_listing(),
            timestamped_listing: result.timestamped_listing(),
            result,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackExtractResponse {
    /// Logs with at least one started track
    pub results: Vec<TrackLogView>,
    /// Names of logs that yielded no tracks
    pub skipped_files: Vec<String>,
}

/// POST /api/tracks/extract
///
/// Only logs with at least one started track appear in `results`.
pub async fn extract_tracks(
    payload: Result<Json<UploadBatch>, JsonRejection>,
) -> ApiResult<Json<TrackExtractResponse>> {
    let Json(batch) = payload?;
    if batch.files.is_empty() {
        return Err(ApiError::BadRequest("At least one file is required".to_string()));
    }

    let (found, empty): (Vec<LogExtractionResult>, Vec<LogExtractionResult>) = batch
        .files
        .iter()
        .map(|file| extract_log(&file.content, &file.file_name))
        .partition(|result| !result.is_empty());

    let results: Vec<TrackLogView> = found.into_iter().map(TrackLogView::from).collect();
    let skipped_files: Vec<String> = empty.into_iter().map(|r| r.file_name).collect();

    info!(
        files = results.len(),
        skipped = skipped_files.len(),
        tracks = results.iter().map(|r| r.result.track_count).sum::<usize>(),
        "Extracted tracks from logs"
    );

    Ok(Json(TrackExtractResponse {
        results,
        skipped_files,
    }))
}
