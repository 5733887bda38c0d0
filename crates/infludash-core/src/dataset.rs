use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::CoreError;

/// Column names as they appear in the source file.
pub mod columns {
    pub const INFLUENCER_ID: &str = "Influencer_ID";
    pub const NAME: &str = "Name";
    pub const CATEGORY: &str = "Category";
    pub const FOLLOWERS: &str = "Followers";
    pub const LIKES: &str = "Likes";
    pub const COMMENTS: &str = "Comments";
    pub const SHARES: &str = "Shares";
    pub const POST_TIMESTAMP: &str = "Post_Timestamp";
    pub const SENTIMENT_SCORE: &str = "Sentiment_Score";
    pub const COLLABORATION: &str = "Collaboration";
    /// Derived during preparation; never read from the file.
    pub const ENGAGEMENT_RATE: &str = "Engagement_Rate";

    pub const REQUIRED: [&str; 10] = [
        INFLUENCER_ID,
        NAME,
        CATEGORY,
        FOLLOWERS,
        LIKES,
        COMMENTS,
        SHARES,
        POST_TIMESTAMP,
        SENTIMENT_SCORE,
        COLLABORATION,
    ];

    /// Headers that are neither required nor derived, in file order.
    #[must_use]
    pub fn extras(headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .filter(|h| !REQUIRED.contains(&h.as_str()) && h.as_str() != ENGAGEMENT_RATE)
            .cloned()
            .collect()
    }
}

/// One influencer post after preparation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub influencer_id: String,
    pub name: String,
    pub category: String,
    pub followers: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    /// `None` when the source value could not be parsed.
    pub post_timestamp: Option<DateTime<Utc>>,
    pub sentiment_score: String,
    pub collaboration: String,
    pub engagement_rate: f64,
    /// Values of the non-required columns, aligned with [`Dataset::extra_columns`].
    pub extras: Vec<String>,
}

/// (likes + comments + shares) / followers.
#[must_use]
pub fn engagement_rate(likes: f64, comments: f64, shares: f64, followers: f64) -> f64 {
    (likes + comments + shares) / followers
}

/// Values of a single column, typed by how the column can be summarized.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues<'a> {
    Numeric(Vec<f64>),
    Text(Vec<&'a str>),
    Temporal(Vec<Option<DateTime<Utc>>>),
}

impl ColumnValues<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Temporal(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Prepared, read-only collection of records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    extra_columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from the source headers and prepared records.
    ///
    /// The column list is the headers in file order followed by
    /// `Engagement_Rate` (unless the file already carried one).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ExtraColumnMismatch` if a record's extra values do not
    /// line up with the extra headers.
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Result<Self, CoreError> {
        let extra_columns = columns::extras(&headers);

        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.extras.len() != extra_columns.len())
        {
            return Err(CoreError::ExtraColumnMismatch {
                index,
                expected: extra_columns.len(),
                got: record.extras.len(),
            });
        }

        let mut all_columns = headers;
        if !all_columns.iter().any(|c| c == columns::ENGAGEMENT_RATE) {
            all_columns.push(columns::ENGAGEMENT_RATE.to_string());
        }

        Ok(Self {
            columns: all_columns,
            extra_columns,
            records,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All column names, including the derived engagement rate.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Values of the named column, or `None` if the dataset has no such column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ColumnValues<'_>> {
        let numeric = |f: fn(&Record) -> f64| {
            Some(ColumnValues::Numeric(self.records.iter().map(f).collect()))
        };

        match name {
            columns::FOLLOWERS => numeric(|r| r.followers),
            columns::LIKES => numeric(|r| r.likes),
            columns::COMMENTS => numeric(|r| r.comments),
            columns::SHARES => numeric(|r| r.shares),
            columns::ENGAGEMENT_RATE => numeric(|r| r.engagement_rate),
            columns::POST_TIMESTAMP => Some(ColumnValues::Temporal(
                self.records.iter().map(|r| r.post_timestamp).collect(),
            )),
            columns::INFLUENCER_ID => Some(self.inferred(|r| r.influencer_id.as_str())),
            columns::NAME => Some(self.text(|r| r.name.as_str())),
            columns::CATEGORY => Some(self.text(|r| r.category.as_str())),
            columns::SENTIMENT_SCORE => Some(self.inferred(|r| r.sentiment_score.as_str())),
            columns::COLLABORATION => Some(self.text(|r| r.collaboration.as_str())),
            other => {
                let idx = self.extra_columns.iter().position(|c| c == other)?;
                Some(self.inferred(|r| r.extras[idx].as_str()))
            }
        }
    }

    fn text<'a>(&'a self, f: impl Fn(&'a Record) -> &'a str) -> ColumnValues<'a> {
        ColumnValues::Text(self.records.iter().map(f).collect())
    }

    /// Numeric when every value parses as a finite number, text otherwise.
    fn inferred<'a>(&'a self, f: impl Fn(&'a Record) -> &'a str) -> ColumnValues<'a> {
        let raw: Vec<&str> = self.records.iter().map(f).collect();
        let parsed: Option<Vec<f64>> = raw
            .iter()
            .map(|v| v.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
            .collect();

        match parsed {
            Some(values) if !values.is_empty() => ColumnValues::Numeric(values),
            _ => ColumnValues::Text(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, id: &str, extra: &str) -> Record {
        Record {
            influencer_id: id.to_string(),
            name: name.to_string(),
            category: "Fashion".to_string(),
            followers: 1000.0,
            likes: 50.0,
            comments: 20.0,
            shares: 10.0,
            post_timestamp: None,
            sentiment_score: "Positive".to_string(),
            collaboration: "Yes".to_string(),
            engagement_rate: engagement_rate(50.0, 20.0, 10.0, 1000.0),
            extras: vec![extra.to_string()],
        }
    }

    fn headers() -> Vec<String> {
        let mut h: Vec<String> = columns::REQUIRED.iter().map(ToString::to_string).collect();
        h.push("Platform".to_string());
        h
    }

    #[test]
    fn engagement_rate_sums_interactions_over_followers() {
        let rate = engagement_rate(50.0, 20.0, 10.0, 1000.0);
        assert!((rate - 0.08).abs() < 1e-12);
    }

    #[test]
    fn new_appends_derived_column_once() {
        let ds = Dataset::new(headers(), vec![record("Ana", "1", "IG")]).expect("dataset");
        assert_eq!(ds.columns().len(), 12);
        assert_eq!(ds.columns().last().map(String::as_str), Some("Engagement_Rate"));
        assert_eq!(ds.extra_columns(), ["Platform".to_string()]);
    }

    #[test]
    fn new_rejects_misaligned_extras() {
        let mut bad = record("Ana", "1", "IG");
        bad.extras.clear();
        let err = Dataset::new(headers(), vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ExtraColumnMismatch {
                index: 0,
                expected: 1,
                got: 0
            }
        ));
    }

    #[test]
    fn column_types_follow_content() {
        let ds = Dataset::new(
            headers(),
            vec![record("Ana", "1", "IG"), record("Ben", "2", "TikTok")],
        )
        .expect("dataset");

        assert_eq!(
            ds.column("Influencer_ID"),
            Some(ColumnValues::Numeric(vec![1.0, 2.0]))
        );
        assert_eq!(
            ds.column("Platform"),
            Some(ColumnValues::Text(vec!["IG", "TikTok"]))
        );
        assert_eq!(ds.column("Likes").map(|c| c.len()), Some(2));
        assert!(matches!(
            ds.column("Post_Timestamp"),
            Some(ColumnValues::Temporal(_))
        ));
        assert_eq!(ds.column("Nope"), None);
    }
}
