//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`homestream_common::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` directly.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use homestream_common::Error;
use serde_json::json;

use crate::streaming::plan::unsatisfied_content_range;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self { inner }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Request failed with server error"
            );
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request rejected");
        }

        // 416 carries no body, only the current resource size.
        if let Error::UnsatisfiableRange { size } = self.inner {
            return (
                status,
                [
                    (header::CONTENT_RANGE, unsatisfied_content_range(size)),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
            )
                .into_response();
        }

        let body = json!({
            "error": self.inner.to_string(),
            "code": self.inner.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
