//! Shared configuration and domain types for the influencer dashboard.
//!
//! The [`Dataset`] built here is the read-only snapshot every request handler
//! works against; it is constructed once by `infludash-data` at startup.

pub mod app_config;
pub mod config;
pub mod dataset;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{columns, ColumnValues, Dataset, Record};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("record {index} carries {got} extra values but the dataset declares {expected}")]
    ExtraColumnMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}
