//! Domain service for the petstore module.

use std::sync::Arc;

use petstore_sdk::{NewPet, Pet, PetId};
use tracing::{debug, info};

use super::error::DomainError;
use super::repo::PetsRepository;

/// Pet store operations on top of a [`PetsRepository`].
pub struct PetStoreService {
    repo: Arc<dyn PetsRepository>,
}

impl PetStoreService {
    #[must_use]
    pub fn new(repo: Arc<dyn PetsRepository>) -> Self {
        Self { repo }
    }

    /// All pets in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Pet> {
        self.repo.list()
    }

    /// Create a pet from `new_pet`.
    ///
    /// # Errors
    ///
    /// `RequiredProperty("name")` when the name is absent; nothing is stored
    /// and no identifier is consumed.
    pub fn create(&self, new_pet: NewPet) -> Result<Pet, DomainError> {
        let Some(name) = new_pet.name else {
            debug!("Rejecting pet without a name");
            return Err(DomainError::required_property("name"));
        };

        let pet = self.repo.insert(name, new_pet.tag);
        info!(pet_id = pet.id, name = %pet.name, "Created pet");
        Ok(pet)
    }

    /// Retrieve a single pet.
    ///
    /// # Errors
    ///
    /// `NotFound` when no pet has the identifier.
    pub fn get(&self, id: PetId) -> Result<Pet, DomainError> {
        self.repo.get(id).ok_or_else(|| {
            debug!(pet_id = id, "Unknown pet identifier");
            DomainError::not_found(id)
        })
    }

    /// Highest identifier handed out so far.
    #[must_use]
    pub fn last_id(&self) -> PetId {
        self.repo.last_id()
    }
}
