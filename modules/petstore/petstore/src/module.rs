//! Module declaration for the petstore module.

use std::sync::Arc;

use petstore_sdk::PetStoreClient;
use restkit::api::{OpenApiRegistry, TagInfo};
use tracing::info;

use crate::domain::repo::PetsRepository;
use crate::domain::seed::initial_pets;
use crate::domain::service::PetStoreService;
use crate::infra::InMemoryPetsRepository;
use crate::local_client::PetStoreLocalClient;

/// Petstore module: owns the store for the lifetime of the process.
#[derive(Clone)]
pub struct PetStoreModule {
    service: Arc<PetStoreService>,
}

impl PetStoreModule {
    /// Module backed by an in-memory store holding the initial pets.
    #[must_use]
    pub fn seeded() -> Self {
        let pets = initial_pets();
        let count = pets.len();
        let module = Self::with_repo(Arc::new(InMemoryPetsRepository::with_pets(pets)));
        info!(
            pets = count,
            last_id = module.service.last_id(),
            "Seeded pet store"
        );
        module
    }

    #[must_use]
    pub fn with_repo(repo: Arc<dyn PetsRepository>) -> Self {
        Self {
            service: Arc::new(PetStoreService::new(repo)),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<PetStoreService> {
        Arc::clone(&self.service)
    }

    /// In-process client sharing this module's store.
    #[must_use]
    pub fn client(&self) -> Arc<dyn PetStoreClient> {
        Arc::new(PetStoreLocalClient::new(self.service()))
    }

    /// Root tags the module's operations refer to.
    #[must_use]
    pub fn openapi_tags() -> Vec<TagInfo> {
        crate::api::rest::routes::tags()
    }

    pub fn register_rest(&self, router: axum::Router, openapi: &dyn OpenApiRegistry) -> axum::Router {
        info!("Registering petstore REST routes");
        let router = crate::api::rest::routes::register_routes(router, openapi, self.service());
        info!("Petstore REST routes registered successfully");
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_shares_the_module_store() {
        let module = PetStoreModule::seeded();
        let client = module.client();

        let pet = client
            .create_pet(petstore_sdk::NewPet::named("Fido"))
            .await
            .unwrap();
        assert_eq!(module.service().get(pet.id).unwrap(), pet);
    }

    #[test]
    fn seeded_store_starts_at_two() {
        let module = PetStoreModule::seeded();
        assert_eq!(module.service().last_id(), 2);
        assert_eq!(PetStoreModule::openapi_tags().len(), 4);
    }
}
