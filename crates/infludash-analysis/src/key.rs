use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// The fixed set of analyses offered in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKey {
    Statistics,
    Engagement,
    Sentiment,
    Collaboration,
    TopInfluencers,
    CategoryEngagement,
    CategorySentiment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown analysis key \"{0}\"")]
pub struct AnalysisKeyError(pub String);

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl AnalysisKey {
    /// Dropdown order; `Statistics` is the initial selection.
    pub const ALL: [AnalysisKey; 7] = [
        AnalysisKey::Statistics,
        AnalysisKey::Engagement,
        AnalysisKey::Sentiment,
        AnalysisKey::Collaboration,
        AnalysisKey::TopInfluencers,
        AnalysisKey::CategoryEngagement,
        AnalysisKey::CategorySentiment,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKey::Statistics => "statistics",
            AnalysisKey::Engagement => "engagement",
            AnalysisKey::Sentiment => "sentiment",
            AnalysisKey::Collaboration => "collaboration",
            AnalysisKey::TopInfluencers => "top_influencers",
            AnalysisKey::CategoryEngagement => "category_engagement",
            AnalysisKey::CategorySentiment => "category_sentiment",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnalysisKey::Statistics => "Descriptive Statistics",
            AnalysisKey::Engagement => "Engagement Rate Distribution",
            AnalysisKey::Sentiment => "Sentiment Distribution",
            AnalysisKey::Collaboration => "Collaboration Impact",
            AnalysisKey::TopInfluencers => "Top Influencers by Engagement Rate",
            AnalysisKey::CategoryEngagement => "Engagement Rate by Category",
            AnalysisKey::CategorySentiment => "Sentiment by Category",
        }
    }
}

impl std::fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKey {
    type Err = AnalysisKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AnalysisKeyError(s.to_string()))
    }
}

/// Dropdown entries in display order.
#[must_use]
pub fn catalogue() -> Vec<AnalysisOption> {
    AnalysisKey::ALL
        .into_iter()
        .map(|k| AnalysisOption {
            value: k.as_str(),
            label: k.label(),
        })
        .collect()
}
