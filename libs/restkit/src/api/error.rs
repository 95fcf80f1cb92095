//! Structured JSON error payloads.
//!
//! Every failing operation answers with an HTTP status and a body of the shape
//! `{ "code": <integer>, "message": <string> }`. The numeric code is defined by
//! the application and stays stable so clients can branch on it.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Content type for every JSON body produced by the toolkit.
pub const APPLICATION_JSON: &str = "application/json";

/// Wire representation of an error, published as the `Error` component schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = Error, description = "Error returned by the API")]
pub struct ErrorBody {
    /// Unique code for the error returned
    pub code: i32,
    /// Error message that provides more information
    pub message: String,
}

/// An error on its way to the client: status plus [`ErrorBody`] fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Body half of the error, as serialized on the wire.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code,
            message: self.message.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut resp = axum::Json(self.body()).into_response();
        *resp.status_mut() = self.status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON),
        );
        resp
    }
}
