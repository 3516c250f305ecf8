//! Custom error types for the messages service
//!
//! Every failure leaves a handler as an [`ApiError`] and is rendered with the
//! same `{"kind", "message"}` envelope.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custom error type for the messages service
#[derive(Error, Debug)]
pub enum ApiError {
    /// A well-formed request referenced a record that does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request collides with an existing record
    #[error("{0}")]
    Conflict(String),

    /// The request body could not be read
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal Server Error")]
    InternalServerError,
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl ApiError {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::InternalServerError => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            kind: self.kind().to_string(),
            message: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
