use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::dashboard::{DashboardController, DashboardError, SourceError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DashboardController>,
}

impl AppState {
    pub fn new(controller: Arc<DashboardController>) -> Self {
        Self { controller }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Internal server error")]
    Internal,
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::MissingParameter => AppError::BadRequest(err.to_string()),
            DashboardError::DataUnavailable { .. } => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Source(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Source(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::NotFound(msg) => msg,
            AppError::Source(msg) => format!("Source error: {}", msg),
            AppError::Internal => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
