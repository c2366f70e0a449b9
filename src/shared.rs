use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::contest::repository::ContestRepository;
use crate::leaderboard::ContestAggregationService;
use crate::profile::repository::ProfileRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub contest_repository: Arc<dyn ContestRepository + Send + Sync>,
    pub profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    pub aggregation_service: Arc<ContestAggregationService>,
}

impl AppState {
    pub fn new(
        contest_repository: Arc<dyn ContestRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
        aggregation_service: Arc<ContestAggregationService>,
    ) -> Self {
        Self {
            contest_repository,
            profile_repository,
            aggregation_service,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
