use axum::{
    extract::{Path, State},
    Extension, Json,
};
use infludash_analysis::{statistics_chart, statistics_for, ChartSpec, StatSummary};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct StatisticsData {
    pub column: String,
    /// `None` when the column does not exist.
    pub summary: Option<StatSummary>,
    pub chart: ChartSpec,
}

pub(super) async fn list_columns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::new(state.dataset.columns().to_vec(), req_id.0))
}

pub(super) async fn get_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(column): Path<String>,
) -> Json<ApiResponse<StatisticsData>> {
    let data = StatisticsData {
        summary: statistics_for(&column, &state.dataset),
        chart: statistics_chart(&column, &state.dataset),
        column,
    };
    Json(ApiResponse::new(data, req_id.0))
}
