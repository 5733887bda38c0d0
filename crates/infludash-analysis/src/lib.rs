//! Chart selection, descriptive statistics and the brand impact calculator.
//!
//! Everything here is a pure function of a borrowed [`Dataset`]; callers share
//! one prepared snapshot across requests.
//!
//! [`Dataset`]: infludash_core::Dataset

pub mod chart;
pub mod impact;
pub mod key;
pub mod select;
pub mod stats;

pub use chart::{BarPoint, ChartLabels, ChartSpec, HistogramBin, Orientation, Series};
pub use impact::{calculate, BrandImpact, BrandImpactError, BrandImpactInput};
pub use key::{catalogue, AnalysisKey, AnalysisKeyError, AnalysisOption};
pub use select::{build_chart, select};
pub use stats::{statistics_chart, statistics_for, StatSummary};
