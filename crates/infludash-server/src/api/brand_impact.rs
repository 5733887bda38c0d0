use axum::{Extension, Json};
use infludash_analysis::{calculate, BrandImpactInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse};

/// Form payload; number inputs may arrive as JSON numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct BrandImpactForm {
    pub category: Option<Value>,
    pub followers: Option<Value>,
    pub likes: Option<Value>,
    pub comments: Option<Value>,
    pub shares: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct BrandImpactData {
    pub category: String,
    pub engagement_rate: f64,
    pub brand_impact: f64,
    pub formatted_impact: String,
    pub message: String,
}

fn field_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

impl From<BrandImpactForm> for BrandImpactInput {
    fn from(form: BrandImpactForm) -> Self {
        Self {
            category: field_text(form.category),
            followers: field_text(form.followers),
            likes: field_text(form.likes),
            comments: field_text(form.comments),
            shares: field_text(form.shares),
        }
    }
}

pub(super) async fn calculate_brand_impact(
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<BrandImpactForm>,
) -> Result<Json<ApiResponse<BrandImpactData>>, ApiError> {
    let input = BrandImpactInput::from(form);

    match calculate(&input) {
        Ok(impact) => Ok(Json(ApiResponse::new(
            BrandImpactData {
                formatted_impact: impact.formatted_impact(),
                message: impact.message(),
                category: impact.category,
                engagement_rate: impact.engagement_rate,
                brand_impact: impact.brand_impact,
            },
            req_id.0,
        ))),
        Err(e) => {
            tracing::debug!(error = %e, "brand impact input rejected");
            Err(ApiError::new(req_id.0, "validation_error", e.to_string()))
        }
    }
}
