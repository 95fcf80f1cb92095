//! `PetStoreClient` trait definition.

use async_trait::async_trait;

use crate::error::PetStoreError;
use crate::models::{NewPet, Pet, PetId};

/// Public API of the `petstore` module for in-process consumers.
#[async_trait]
pub trait PetStoreClient: Send + Sync {
    /// All pets in insertion order.
    async fn list_pets(&self) -> Result<Vec<Pet>, PetStoreError>;

    /// Create a pet and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// * `MissingProperty` - if `name` is absent
    async fn create_pet(&self, new_pet: NewPet) -> Result<Pet, PetStoreError>;

    /// Retrieve a single pet.
    ///
    /// # Errors
    ///
    /// * `NotFound` - if no pet has the given identifier
    async fn get_pet(&self, id: PetId) -> Result<Pet, PetStoreError>;
}
