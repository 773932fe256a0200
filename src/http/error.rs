//! Client-visible error mapping.
//!
//! Every failure a handler or interceptor can hit becomes a plain-text
//! response. Storage failures are not distinguished by status: all of them are
//! 400 with the error message as body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::middleware::MediaTypeError;
use crate::store::StoreError;

/// Errors surfaced by the request pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not a valid book.
    #[error("{0}")]
    Decode(serde_json::Error),

    /// Response body could not be serialized.
    #[error("{0}")]
    Encode(serde_json::Error),

    /// Storage provider rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Route expects an id but none was supplied.
    #[error("no id found in request")]
    MissingId,

    /// `Content-Type` header could not be parsed.
    #[error(transparent)]
    UnparseableContentType(#[from] MediaTypeError),

    /// `Content-Type` parsed but is not JSON.
    #[error("invalid Content-Type")]
    InvalidContentType(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Decode(_)
            | ApiError::Store(_)
            | ApiError::MissingId
            | ApiError::UnparseableContentType(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
