use thiserror::Error;

/// Failures surfaced while loading, saving or validating model data. Scoring never fails.
#[derive(Error, Debug)]
pub enum DevScoreError {
    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed reference table CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model config: {0}")]
    Config(String),

    #[error("invalid reference data: {0}")]
    Validation(String),
}

pub type DsResult<T> = Result<T, DevScoreError>;
