use serde::Serialize;

pub const INVALID_TITLE: &str = "Invalid Analysis Type";
pub const INVALID_PLACEHOLDER: &str = "Please select a valid analysis type from the dropdown menu.";
pub const INVALID_MESSAGE: &str =
    "Invalid analysis type selected. Please choose a valid option from the dropdown menu.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    #[must_use]
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }
}

/// Half-open `[start, end)` bucket; the last bucket also includes `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// One value per entry in the chart's `categories`.
    pub values: Vec<f64>,
}

/// Aggregated data plus the presentation hints the browser needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// No chart: the caller shows the per-column statistics picker instead.
    StatisticsPrompt {
        title: String,
        columns: Vec<String>,
        default_column: String,
    },
    Histogram {
        #[serde(flatten)]
        labels: ChartLabels,
        bins: Vec<HistogramBin>,
    },
    Bar {
        #[serde(flatten)]
        labels: ChartLabels,
        orientation: Orientation,
        bars: Vec<BarPoint>,
    },
    StackedBar {
        #[serde(flatten)]
        labels: ChartLabels,
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Invalid {
        #[serde(flatten)]
        labels: ChartLabels,
        placeholder: String,
        message: String,
    },
}

impl ChartSpec {
    #[must_use]
    pub fn invalid() -> Self {
        ChartSpec::Invalid {
            labels: ChartLabels::new(INVALID_TITLE, "X-Axis", "Y-Axis"),
            placeholder: INVALID_PLACEHOLDER.to_string(),
            message: INVALID_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, ChartSpec::Invalid { .. })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::StatisticsPrompt { title, .. } => title,
            ChartSpec::Histogram { labels, .. }
            | ChartSpec::Bar { labels, .. }
            | ChartSpec::StackedBar { labels, .. }
            | ChartSpec::Invalid { labels, .. } => &labels.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_spec_serializes_with_kind_and_flattened_labels() {
        let json = serde_json::to_value(ChartSpec::invalid()).expect("serialize");
        assert_eq!(json["kind"], "invalid");
        assert_eq!(json["title"], INVALID_TITLE);
        assert_eq!(json["x_label"], "X-Axis");
        assert_eq!(json["message"], INVALID_MESSAGE);
    }

    #[test]
    fn bar_spec_serializes_orientation() {
        let spec = ChartSpec::Bar {
            labels: ChartLabels::new("t", "x", "y"),
            orientation: Orientation::Horizontal,
            bars: vec![BarPoint {
                label: "Ana".to_string(),
                value: 0.5,
            }],
        };
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["orientation"], "horizontal");
        assert_eq!(json["bars"][0]["label"], "Ana");
        assert_eq!(spec.title(), "t");
        assert!(!spec.is_invalid());
    }
}
