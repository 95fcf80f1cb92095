//! Domain error types for the petstore module.

use petstore_sdk::{PetId, PetStoreError};
use thiserror::Error;

/// Domain-level errors for the petstore module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No pet is stored under the identifier.
    #[error("Unknown Pet identifier: {0}")]
    NotFound(PetId),

    /// A property needed to create a pet is missing or null.
    #[error("Required property not defined: {0}")]
    RequiredProperty(String),
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: PetId) -> Self {
        Self::NotFound(id)
    }

    #[must_use]
    pub fn required_property(name: impl Into<String>) -> Self {
        Self::RequiredProperty(name.into())
    }
}

impl From<DomainError> for PetStoreError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(id) => PetStoreError::not_found(id),
            DomainError::RequiredProperty(name) => PetStoreError::missing_property(name),
        }
    }
}
