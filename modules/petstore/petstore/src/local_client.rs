//! Local client implementing the `PetStoreClient` trait.

use std::sync::Arc;

use async_trait::async_trait;
use petstore_sdk::{NewPet, Pet, PetId, PetStoreClient, PetStoreError};

use crate::domain::service::PetStoreService;

/// In-process client that delegates to the domain service.
pub struct PetStoreLocalClient {
    service: Arc<PetStoreService>,
}

impl PetStoreLocalClient {
    #[must_use]
    pub fn new(service: Arc<PetStoreService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PetStoreClient for PetStoreLocalClient {
    async fn list_pets(&self) -> Result<Vec<Pet>, PetStoreError> {
        Ok(self.service.list())
    }

    async fn create_pet(&self, new_pet: NewPet) -> Result<Pet, PetStoreError> {
        self.service.create(new_pet).map_err(PetStoreError::from)
    }

    async fn get_pet(&self, id: PetId) -> Result<Pet, PetStoreError> {
        self.service.get(id).map_err(PetStoreError::from)
    }
}
