mod analysis;
mod brand_impact;
mod statistics;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use infludash_core::Dataset;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};
use crate::pages;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    records: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyses", get(analysis::list_analyses))
        .route("/api/v1/analyses/{key}", get(analysis::get_analysis))
        .route("/api/v1/columns", get(statistics::list_columns))
        .route("/api/v1/statistics/{column}", get(statistics::get_statistics))
        .route("/api/v1/brand-impact", post(brand_impact::calculate_brand_impact))
}

fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/analysis", get(pages::analysis))
}

/// Assemble the full application.
///
/// CORS is wide open only when `permissive_cors` is set (development).
pub fn build_app(state: AppState, permissive_cors: bool) -> Router {
    let mut app = Router::new()
        .merge(page_router())
        .merge(api_router())
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        );

    if permissive_cors {
        app = app.layer(build_cors());
    }

    app.with_state(state)
}

/// Unknown API paths get a JSON 404; everything else lands on the home page.
async fn fallback(uri: Uri, Extension(req_id): Extension<RequestId>) -> Response {
    if uri.path().starts_with("/api/") {
        return ApiError::new(req_id.0, "not_found", format!("no route for {}", uri.path()))
            .into_response();
    }
    pages::home().await.into_response()
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            records: state.dataset.len(),
        },
        req_id.0,
    ))
}
