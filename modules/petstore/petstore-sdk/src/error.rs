//! Error type returned by `PetStoreClient`.

use thiserror::Error;

use crate::models::PetId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PetStoreError {
    /// No pet carries the requested identifier.
    #[error("Unknown Pet identifier: {0}")]
    NotFound(PetId),

    /// A property the store needs was not supplied.
    #[error("Required property not defined: {0}")]
    MissingProperty(String),
}

impl PetStoreError {
    #[must_use]
    pub fn not_found(id: PetId) -> Self {
        Self::NotFound(id)
    }

    #[must_use]
    pub fn missing_property(name: impl Into<String>) -> Self {
        Self::MissingProperty(name.into())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub const fn is_missing_property(&self) -> bool {
        matches!(self, Self::MissingProperty(_))
    }
}
