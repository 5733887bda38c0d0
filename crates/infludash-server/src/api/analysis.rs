use axum::{
    extract::{Path, State},
    Extension, Json,
};
use infludash_analysis::{catalogue, select, AnalysisOption, ChartSpec};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

pub(super) async fn list_analyses(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<AnalysisOption>>> {
    Json(ApiResponse::new(catalogue(), req_id.0))
}

/// Unknown keys still answer 200; the `invalid` chart carries the message.
pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(key): Path<String>,
) -> Json<ApiResponse<ChartSpec>> {
    Json(ApiResponse::new(select(&key, &state.dataset), req_id.0))
}
