use std::collections::{BTreeMap, BTreeSet};

use infludash_core::{columns, ColumnValues, Dataset, Record};

use crate::chart::{BarPoint, ChartLabels, ChartSpec, HistogramBin, Orientation, Series};
use crate::key::AnalysisKey;

pub const HISTOGRAM_BINS: usize = 20;
pub const TOP_INFLUENCERS: usize = 10;
pub const DEFAULT_STATISTICS_COLUMN: &str = columns::INFLUENCER_ID;

/// Map a dropdown value to its chart; unknown values get the invalid placeholder.
#[must_use]
pub fn select(key: &str, dataset: &Dataset) -> ChartSpec {
    match key.parse::<AnalysisKey>() {
        Ok(key) => build_chart(key, dataset),
        Err(e) => {
            tracing::debug!(error = %e, "invalid analysis selection");
            ChartSpec::invalid()
        }
    }
}

#[must_use]
pub fn build_chart(key: AnalysisKey, dataset: &Dataset) -> ChartSpec {
    match key {
        AnalysisKey::Statistics => ChartSpec::StatisticsPrompt {
            title: "Descriptive Statistics".to_string(),
            columns: dataset.columns().to_vec(),
            default_column: DEFAULT_STATISTICS_COLUMN.to_string(),
        },
        AnalysisKey::Engagement => ChartSpec::Histogram {
            labels: ChartLabels::new(
                "Distribution of Engagement Rates",
                "Engagement Rate",
                "Frequency",
            ),
            bins: histogram(
                dataset.records().iter().map(|r| r.engagement_rate),
                HISTOGRAM_BINS,
            ),
        },
        AnalysisKey::Sentiment => ChartSpec::Bar {
            labels: ChartLabels::new("Sentiment Distribution", "Sentiment", "Proportion"),
            orientation: Orientation::Vertical,
            bars: proportions(&SentimentGroups::of(dataset))
                .into_iter()
                .map(|(label, value)| BarPoint { label, value })
                .collect(),
        },
        AnalysisKey::Collaboration => ChartSpec::Bar {
            labels: ChartLabels::new(
                "Engagement Rate for Collaborations",
                "Collaboration",
                "Average Engagement Rate",
            ),
            orientation: Orientation::Vertical,
            bars: to_bars(mean_engagement_by(dataset, |r| &r.collaboration)),
        },
        AnalysisKey::TopInfluencers => ChartSpec::Bar {
            labels: ChartLabels::new(
                "Top 10 Influencers by Engagement Rate",
                "Engagement Rate",
                "Influencer",
            ),
            orientation: Orientation::Horizontal,
            bars: top_influencers(dataset, TOP_INFLUENCERS),
        },
        AnalysisKey::CategoryEngagement => ChartSpec::Bar {
            labels: ChartLabels::new(
                "Average Engagement Rate by Category",
                "Category",
                "Average Engagement Rate",
            ),
            orientation: Orientation::Vertical,
            bars: to_bars(mean_engagement_by(dataset, |r| &r.category)),
        },
        AnalysisKey::CategorySentiment => {
            let (categories, series) = sentiment_by_category(dataset);
            ChartSpec::StackedBar {
                labels: ChartLabels::new(
                    "Sentiment Distribution by Category",
                    "Category",
                    "Proportion",
                ),
                categories,
                series,
            }
        }
    }
}

/// Equal-width buckets spanning the observed range.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn histogram(values: impl Iterator<Item = f64>, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.collect();
    let Some((mut min, mut max)) = values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    }) else {
        return Vec::new();
    };

    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

/// Sentiment value of every record mapped to a group index.
///
/// Group labels are in ascending order: numeric when the whole column parses
/// as finite numbers (so `0.5` and `0.50` share a group), textual otherwise.
struct SentimentGroups {
    labels: Vec<String>,
    /// One group index per record, in record order.
    members: Vec<usize>,
}

impl SentimentGroups {
    fn of(dataset: &Dataset) -> Self {
        match dataset.column(columns::SENTIMENT_SCORE) {
            Some(ColumnValues::Numeric(scores)) => {
                // Adding 0.0 folds -0.0 into 0.0.
                let mut distinct: Vec<f64> = scores.iter().map(|s| s + 0.0).collect();
                distinct.sort_by(f64::total_cmp);
                distinct.dedup();
                Self {
                    members: scores
                        .iter()
                        .map(|s| distinct.partition_point(|d| d < s))
                        .collect(),
                    labels: distinct.iter().map(f64::to_string).collect(),
                }
            }
            _ => {
                let distinct: Vec<&str> = dataset
                    .records()
                    .iter()
                    .map(|r| r.sentiment_score.as_str())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                Self {
                    members: dataset
                        .records()
                        .iter()
                        .map(|r| distinct.partition_point(|d| *d < r.sentiment_score.as_str()))
                        .collect(),
                    labels: distinct.iter().map(ToString::to_string).collect(),
                }
            }
        }
    }
}

/// Share of each group, most frequent first; ties keep first-seen order.
#[allow(clippy::cast_precision_loss)]
fn proportions(groups: &SentimentGroups) -> Vec<(String, f64)> {
    let mut counts = vec![0_usize; groups.labels.len()];
    let mut order: Vec<usize> = Vec::new();
    for &g in &groups.members {
        if counts[g] == 0 {
            order.push(g);
        }
        counts[g] += 1;
    }

    let total = groups.members.len();
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));

    order
        .into_iter()
        .map(|g| (groups.labels[g].clone(), counts[g] as f64 / total as f64))
        .collect()
}

/// Mean engagement rate per group, groups in ascending key order.
#[allow(clippy::cast_precision_loss)]
fn mean_engagement_by<'a>(
    dataset: &'a Dataset,
    group: impl Fn(&'a Record) -> &'a String,
) -> BTreeMap<&'a str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in dataset.records() {
        let entry = sums.entry(group(record).as_str()).or_insert((0.0, 0));
        entry.0 += record.engagement_rate;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

fn to_bars(groups: BTreeMap<&str, f64>) -> Vec<BarPoint> {
    groups
        .into_iter()
        .map(|(label, value)| BarPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}

fn top_influencers(dataset: &Dataset, limit: usize) -> Vec<BarPoint> {
    let mut ranked: Vec<(&str, f64)> = mean_engagement_by(dataset, |r| &r.name)
        .into_iter()
        .collect();
    // BTreeMap order makes the name tie-break stable.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked
        .into_iter()
        .map(|(name, value)| BarPoint {
            label: name.to_string(),
            value,
        })
        .collect()
}

/// Per-category sentiment shares, one series per sentiment group.
#[allow(clippy::cast_precision_loss)]
fn sentiment_by_category(dataset: &Dataset) -> (Vec<String>, Vec<Series>) {
    let groups = SentimentGroups::of(dataset);
    let mut counts: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

    for (record, &g) in dataset.records().iter().zip(&groups.members) {
        counts
            .entry(record.category.as_str())
            .or_insert_with(|| vec![0; groups.labels.len()])[g] += 1;
    }

    let totals: Vec<usize> = counts.values().map(|by| by.iter().sum()).collect();

    let series = groups
        .labels
        .iter()
        .enumerate()
        .map(|(g, label)| Series {
            name: label.clone(),
            values: counts
                .values()
                .zip(&totals)
                .map(|(by, &total)| by[g] as f64 / total as f64)
                .collect(),
        })
        .collect();

    let categories = counts.keys().map(|c| (*c).to_string()).collect();
    (categories, series)
}

#[cfg(test)]
#[path = "select_test.rs"]
mod tests;
