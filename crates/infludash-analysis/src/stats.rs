use std::collections::HashMap;

use chrono::{DateTime, Utc};
use infludash_core::{ColumnValues, Dataset};
use serde::Serialize;

use crate::chart::{BarPoint, ChartLabels, ChartSpec, Orientation};

/// Descriptive summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatSummary {
    Numeric(NumericSummary),
    Text(TextSummary),
    Temporal(TemporalSummary),
}

/// `None` fields mean the statistic is undefined for the row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1).
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSummary {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalSummary {
    /// Rows with a parsed timestamp.
    pub count: usize,
    /// Rows whose timestamp was coerced to invalid.
    pub invalid: usize,
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
}

impl StatSummary {
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            StatSummary::Numeric(s) => s.count,
            StatSummary::Text(s) => s.count,
            StatSummary::Temporal(s) => s.count,
        }
    }

    /// Numeric-valued statistics in display order.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        match self {
            StatSummary::Numeric(s) => [
                ("count", Some(s.count as f64)),
                ("mean", s.mean),
                ("std", s.std),
                ("min", s.min),
                ("25%", s.q25),
                ("50%", s.q50),
                ("75%", s.q75),
                ("max", s.max),
            ]
            .into_iter()
            .filter_map(|(name, v)| v.map(|v| (name, v)))
            .collect(),
            StatSummary::Text(s) => vec![
                ("count", s.count as f64),
                ("unique", s.unique as f64),
                ("freq", s.freq as f64),
            ],
            StatSummary::Temporal(s) => {
                vec![("count", s.count as f64), ("invalid", s.invalid as f64)]
            }
        }
    }
}

/// Summary of the named column, or `None` when the dataset has no such column.
#[must_use]
pub fn statistics_for(column: &str, dataset: &Dataset) -> Option<StatSummary> {
    let Some(values) = dataset.column(column) else {
        tracing::debug!(column, "statistics requested for unknown column");
        return None;
    };

    Some(match values {
        ColumnValues::Numeric(v) => StatSummary::Numeric(numeric_summary(v)),
        ColumnValues::Text(v) => StatSummary::Text(text_summary(&v)),
        ColumnValues::Temporal(v) => StatSummary::Temporal(temporal_summary(&v)),
    })
}

/// Bar chart of a column's statistics; unknown columns give an empty chart.
#[must_use]
pub fn statistics_chart(column: &str, dataset: &Dataset) -> ChartSpec {
    let bars = statistics_for(column, dataset)
        .map(|summary| {
            summary
                .entries()
                .into_iter()
                .map(|(label, value)| BarPoint {
                    label: label.to_string(),
                    value,
                })
                .collect()
        })
        .unwrap_or_default();

    ChartSpec::Bar {
        labels: ChartLabels::new(format!("Statistics for {column}"), "Statistic", "Value"),
        orientation: Orientation::Vertical,
        bars,
    }
}

#[allow(clippy::cast_precision_loss)]
fn numeric_summary(mut values: Vec<f64>) -> NumericSummary {
    values.sort_by(f64::total_cmp);
    let n = values.len();

    let mean = (n > 0).then(|| values.iter().sum::<f64>() / n as f64);
    let std = mean.filter(|_| n > 1).map(|m| {
        let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    NumericSummary {
        count: n,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        q50: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear interpolation between closest ranks over sorted input.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn text_summary(values: &[&str]) -> TextSummary {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (seen, v) in values.iter().enumerate() {
        counts.entry(*v).or_insert((0, seen)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, (n, _))| ((*v).to_string(), *n));

    TextSummary {
        count: values.len(),
        unique: counts.len(),
        freq: top.as_ref().map_or(0, |(_, n)| *n),
        top: top.map(|(v, _)| v),
    }
}

fn temporal_summary(values: &[Option<DateTime<Utc>>]) -> TemporalSummary {
    let valid: Vec<DateTime<Utc>> = values.iter().flatten().copied().collect();
    TemporalSummary {
        count: valid.len(),
        invalid: values.len() - valid.len(),
        min: valid.iter().min().copied(),
        max: valid.iter().max().copied(),
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
