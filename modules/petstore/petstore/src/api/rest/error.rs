//! REST error mapping for the petstore module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use petstore_sdk::PetId;
use restkit::ApiError;
use restkit::api::MEDIA_TYPE_ERROR_CODE;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(_) => unknown_pet_identifier(),
            DomainError::RequiredProperty(name) => ErrorCode::RequiredProperty
                .with_message(format!("Required property not defined: {name}")),
        }
    }
}

fn unknown_pet_identifier() -> ApiError {
    ErrorCode::UnknownPetIdentifier.with_message("Unknown Pet identifier")
}

/// Parse the `petId` path segment. Anything that is not an integer cannot name
/// a stored pet, so it is reported like a lookup miss.
pub fn parse_pet_id(raw: &str) -> Result<PetId, ApiError> {
    raw.trim().parse::<PetId>().map_err(|_| {
        tracing::debug!(pet_id = raw, "Pet identifier is not an integer");
        unknown_pet_identifier()
    })
}

/// Map a body that axum could not turn into the request DTO.
pub fn from_json_rejection(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "Could not read request body");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            MEDIA_TYPE_ERROR_CODE,
            "Content-Type must be application/json",
        ),
        _ => ErrorCode::UnreadableBody.with_message("Could not read JSON body"),
    }
}
