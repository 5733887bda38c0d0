use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use infludash_core::{columns, dataset::engagement_rate, Dataset, Record};

use crate::{timestamp::parse_timestamp, DataError};

/// Cell values treated as missing, on top of empty cells.
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// What preparation kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing: usize,
    pub dropped_malformed: usize,
    pub dropped_zero_followers: usize,
    /// Kept rows whose timestamp could not be parsed.
    pub invalid_timestamps: usize,
}

impl PrepReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped_missing + self.dropped_malformed + self.dropped_zero_followers
    }
}

#[derive(Debug)]
pub struct Prepared {
    pub dataset: Dataset,
    pub report: PrepReport,
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    influencer_id: usize,
    name: usize,
    category: usize,
    followers: usize,
    likes: usize,
    comments: usize,
    shares: usize,
    post_timestamp: usize,
    sentiment_score: usize,
    collaboration: usize,
    extras: Vec<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| -> Result<usize, DataError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let extras = columns::extras(headers)
            .iter()
            .filter_map(|extra| headers.iter().position(|h| h == extra))
            .collect();

        Ok(Self {
            influencer_id: find(columns::INFLUENCER_ID)?,
            name: find(columns::NAME)?,
            category: find(columns::CATEGORY)?,
            followers: find(columns::FOLLOWERS)?,
            likes: find(columns::LIKES)?,
            comments: find(columns::COMMENTS)?,
            shares: find(columns::SHARES)?,
            post_timestamp: find(columns::POST_TIMESTAMP)?,
            sentiment_score: find(columns::SENTIMENT_SCORE)?,
            collaboration: find(columns::COLLABORATION)?,
            extras,
        })
    }
}

enum RowOutcome {
    Kept(Record),
    Missing,
    Malformed,
    ZeroFollowers,
}

/// Load and prepare the dataset at `path`.
///
/// # Errors
///
/// Returns `DataError` if the file cannot be opened, its header row cannot be
/// read, or a required column is absent. Bad rows never fail the load.
pub fn load_dataset(path: &Path) -> Result<Prepared, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let prepared = prepare_from_reader(file)?;
    let report = &prepared.report;
    tracing::info!(
        path = %path.display(),
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        dropped_missing = report.dropped_missing,
        dropped_malformed = report.dropped_malformed,
        dropped_zero_followers = report.dropped_zero_followers,
        invalid_timestamps = report.invalid_timestamps,
        "dataset prepared"
    );

    Ok(prepared)
}

/// Prepare a dataset from any CSV source.
///
/// # Errors
///
/// Returns `DataError` for header-level problems only.
pub fn prepare_from_reader<R: Read>(reader: R) -> Result<Prepared, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(ToOwned::to_owned)
        .collect();
    let index = ColumnIndex::from_headers(&headers)?;

    let mut report = PrepReport::default();
    let mut records = Vec::new();

    for (line, row) in csv_reader.records().enumerate() {
        report.rows_read += 1;

        let outcome = match row {
            Ok(row) if row.len() == headers.len() => prepare_row(&row, &index),
            Ok(_) => RowOutcome::Malformed,
            Err(e) => {
                tracing::trace!(line = line + 2, error = %e, "unreadable row");
                RowOutcome::Malformed
            }
        };

        match outcome {
            RowOutcome::Kept(record) => {
                if record.post_timestamp.is_none() {
                    report.invalid_timestamps += 1;
                }
                records.push(record);
            }
            RowOutcome::Missing => report.dropped_missing += 1,
            RowOutcome::Malformed => report.dropped_malformed += 1,
            RowOutcome::ZeroFollowers => report.dropped_zero_followers += 1,
        }
    }

    report.rows_kept = records.len();
    let dataset = Dataset::new(headers, records)?;

    Ok(Prepared { dataset, report })
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || NA_MARKERS.contains(&value)
}

fn parse_count(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn prepare_row(row: &StringRecord, index: &ColumnIndex) -> RowOutcome {
    if row.iter().any(is_missing) {
        return RowOutcome::Missing;
    }

    let field = |i: usize| row.get(i).unwrap_or_default().to_string();

    let (Some(followers), Some(likes), Some(comments), Some(shares)) = (
        parse_count(&row[index.followers]),
        parse_count(&row[index.likes]),
        parse_count(&row[index.comments]),
        parse_count(&row[index.shares]),
    ) else {
        return RowOutcome::Malformed;
    };

    if followers == 0.0 {
        return RowOutcome::ZeroFollowers;
    }

    let rate = engagement_rate(likes, comments, shares, followers);
    if !rate.is_finite() {
        return RowOutcome::Malformed;
    }

    RowOutcome::Kept(Record {
        influencer_id: field(index.influencer_id),
        name: field(index.name),
        category: field(index.category),
        followers,
        likes,
        comments,
        shares,
        post_timestamp: parse_timestamp(&row[index.post_timestamp]),
        sentiment_score: field(index.sentiment_score),
        collaboration: field(index.collaboration),
        engagement_rate: rate,
        extras: index.extras.iter().map(|&i| field(i)).collect(),
    })
}

#[cfg(test)]
#[path = "prepare_test.rs"]
mod tests;
