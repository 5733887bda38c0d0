use serde::{Deserialize, Serialize};
use thiserror::Error;

use infludash_core::dataset::engagement_rate;

/// Placeholder scaling from engagement rate to impact score.
pub const IMPACT_SCALE: f64 = 100.0;

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandImpactInput {
    pub category: String,
    pub followers: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandImpact {
    pub category: String,
    pub engagement_rate: f64,
    pub brand_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrandImpactError {
    #[error("Please enter valid numerical values for the metrics.")]
    NotNumeric,

    #[error("Followers cannot be zero.")]
    ZeroFollowers,
}

impl BrandImpact {
    #[must_use]
    pub fn formatted_impact(&self) -> String {
        format!("{:.2}", self.brand_impact)
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Brand Impact for category '{}' is {} based on the provided metrics.",
            self.category,
            self.formatted_impact()
        )
    }
}

fn parse_metric(raw: &str) -> Result<f64, BrandImpactError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(BrandImpactError::NotNumeric)
}

/// Score the submitted metrics.
///
/// All four metrics are parsed before followers is checked, so a zero
/// follower count next to a non-numeric field reports the numeric error.
///
/// # Errors
///
/// `NotNumeric` if any metric fails to parse, `ZeroFollowers` if followers is 0.
pub fn calculate(input: &BrandImpactInput) -> Result<BrandImpact, BrandImpactError> {
    let followers = parse_metric(&input.followers)?;
    let likes = parse_metric(&input.likes)?;
    let comments = parse_metric(&input.comments)?;
    let shares = parse_metric(&input.shares)?;

    if followers == 0.0 {
        return Err(BrandImpactError::ZeroFollowers);
    }

    let rate = engagement_rate(likes, comments, shares, followers);
    Ok(BrandImpact {
        category: input.category.clone(),
        engagement_rate: rate,
        brand_impact: rate * IMPACT_SCALE,
    })
}
