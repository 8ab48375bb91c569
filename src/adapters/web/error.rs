//! HTTP error responses for web adapter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::error::DeskError;

/// `{"error": "..."}` body shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &DeskError) -> StatusCode {
    match err {
        DeskError::Order(_) => StatusCode::BAD_REQUEST,
        DeskError::Feed(_)
        | DeskError::Database { .. }
        | DeskError::DatabaseQuery { .. }
        | DeskError::ConfigParse { .. }
        | DeskError::ConfigMissing { .. }
        | DeskError::ConfigInvalid { .. }
        | DeskError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DeskError> for WebError {
    fn from(err: DeskError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
