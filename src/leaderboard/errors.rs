use thiserror::Error;

use crate::shared::AppError;

/// Failures that abort a whole aggregation pass.
/// Per-participant stats failures never surface here.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("contest could not be found: {0}")]
    ContestNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] AppError),
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::ContestNotFound(_) => {
                AppError::NotFound("contest could not be found".to_string())
            }
            AggregationError::Storage(inner) => inner,
        }
    }
}
