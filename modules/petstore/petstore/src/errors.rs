//! Error catalog of the petstore REST API.
//!
//! Codes are part of the public contract: clients branch on them, so a code
//! never changes meaning once published.

use axum::http::StatusCode;
use restkit::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Lookup of a pet that does not exist
    UnknownPetIdentifier,
    /// Create request without a required property
    RequiredProperty,
    /// Create request whose body is not a pet JSON object
    UnreadableBody,
}

impl ErrorCode {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::UnknownPetIdentifier => 1000,
            Self::RequiredProperty => 2000,
            Self::UnreadableBody => 2001,
        }
    }

    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::UnknownPetIdentifier | Self::RequiredProperty => StatusCode::BAD_REQUEST,
            Self::UnreadableBody => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Build the API error for this code with a caller-supplied message.
    pub fn with_message(self, message: impl Into<String>) -> ApiError {
        ApiError::new(self.status(), self.code(), message)
    }
}
