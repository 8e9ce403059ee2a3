//! Error types for the library catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::Envelope;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {}", storage_message(.0))]
    Database(#[from] sqlx::Error),

    #[error("Book {0} not found")]
    NotFound(i32),

    #[error("No fields to update")]
    EmptyUpdate,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Message reported by the storage engine itself, when there is one
fn storage_message(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db) => db.message().to_string(),
        None => error.to_string(),
    }
}

impl AppError {
    /// Status used when a handler does not impose its own
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmptyUpdate | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// An application error paired with the status the endpoint reports it with
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: AppError,
}

impl ApiError {
    pub fn new(status: StatusCode, error: AppError) -> Self {
        Self { status, error }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error.status_code(), error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.error.to_string();

        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", message);
        } else {
            tracing::warn!(status = %self.status, "{}", message);
        }

        (self.status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Attach an endpoint's failure status to a result
pub trait ResultExt<T> {
    fn or_status(self, status: StatusCode) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn or_status(self, status: StatusCode) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::new(status, error))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
