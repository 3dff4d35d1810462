//! Tool registry endpoint

use axum::Json;
use hptk_common::{tools, Tool};

/// GET /api/tools
pub async fn list_tools() -> Json<&'static [Tool]> {
    Json(tools::all())
}
