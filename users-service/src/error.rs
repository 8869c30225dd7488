use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use users_shared::error::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// A storage failure after the request was validated. Only `message` is
    /// returned to the caller, the source is logged.
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn storage(message: impl Into<String>, source: StoreError) -> Self {
        AppError::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned for every failed request
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: u16,
    pub description: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(msg) => tracing::warn!("Not found error: {}", msg),
            AppError::BadRequest(msg) => tracing::warn!("Bad request error: {}", msg),
            AppError::Storage { message, source } => {
                tracing::error!(error = %source, "Internal server error: {}", message)
            }
        }

        let body = ErrorResponse {
            code: status.as_u16(),
            description: self.to_string(),
        };
        tracing::info!(
            "Returning error response: status={}, description={}",
            status,
            body.description
        );
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
