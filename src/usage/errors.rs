use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Cutoff fraction must be in (0, 1], got {0}")]
    InvalidCutoff(f64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed usage document: {0}")]
    Parse(#[from] serde_json::Error),
}
