use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column \"{0}\"")]
    MissingColumn(String),

    #[error("dataset assembly failed: {0}")]
    Core(#[from] infludash_core::CoreError),
}
