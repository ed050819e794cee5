//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced to HTTP clients as plain-text responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unable to read request body")]
    UnreadableBody,

    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Failed to encode form data")]
    Encode(#[source] form::FormError),

    #[error("Failed to fill form")]
    Fill(#[source] form::FormError),

    #[error("Failed to read form template")]
    Template(#[source] pdf_core::PdfError),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnreadableBody | ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::Encode(_)
            | ApiError::Fill(_)
            | ApiError::Template(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), format!("{}\n", self)).into_response()
    }
}
