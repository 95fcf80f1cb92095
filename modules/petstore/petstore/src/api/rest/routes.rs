use axum::http;
use axum::{Extension, Router};
use restkit::api::{Missing, OpenApiRegistry, OperationBuilder, TagInfo};
use std::sync::Arc;

use super::dto::{CreatePetReq, PetDto};
use super::handlers;
use crate::domain::service::PetStoreService;

pub const TAG_GET: &str = "GET";
pub const TAG_POST: &str = "POST";
pub const TAG_READ: &str = "Read Pet(s)";
pub const TAG_CREATE: &str = "Create a Pet";

/// Root-level tags referenced by the petstore operations.
#[must_use]
pub fn tags() -> Vec<TagInfo> {
    vec![
        TagInfo::new(TAG_GET, "HTTP GET operations"),
        TagInfo::new(TAG_POST, "HTTP POST operations"),
        TagInfo::new(
            TAG_READ,
            "Retrieve the properties of one-or-more pets based on the requested URI",
        ),
        TagInfo::new(
            TAG_CREATE,
            "Create a new Pet resource in the Petstore collection",
        ),
    ]
}

/// Register all REST routes for the petstore module
pub fn register_routes(
    mut router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<PetStoreService>,
) -> Router {
    // GET /pets - List all pets
    router = OperationBuilder::<Missing, Missing, ()>::get("/pets")
        .operation_id("getPets")
        .summary("Get all pets")
        .description("Retrieve a list of all pets")
        .tag(TAG_GET)
        .tag(TAG_READ)
        .handler(handlers::list_pets)
        .json_array_response_with_schema::<PetDto>(openapi, http::StatusCode::OK, "List of pets")
        .default_error_response(openapi, "Unexpected error")
        .register(router, openapi);

    // POST /pets - Create a pet
    router = OperationBuilder::<Missing, Missing, ()>::post("/pets")
        .operation_id("createPet")
        .summary("Create a pet")
        .description("Create a new pet in the system")
        .tag(TAG_POST)
        .tag(TAG_CREATE)
        .json_request::<CreatePetReq>(openapi, "Pet to add to the store")
        .handler(handlers::create_pet)
        .empty_response(http::StatusCode::CREATED, "Pet created")
        .default_error_response(openapi, "Unexpected error")
        .register(router, openapi);

    // GET /pets/{petId} - Get a specific pet
    router = OperationBuilder::<Missing, Missing, ()>::get("/pets/{petId}")
        .operation_id("getPetById")
        .summary("Get pet by ID")
        .description("Retrieve a pet by its ID")
        .tag(TAG_GET)
        .tag(TAG_READ)
        .path_param_typed("petId", "ID of the pet to retrieve", "integer")
        .handler(handlers::get_pet)
        .json_response_with_schema::<PetDto>(openapi, http::StatusCode::OK, "Pet found")
        .default_error_response(openapi, "Unexpected error")
        .register(router, openapi);

    // Attach service to router as extension
    router.layer(Extension(service))
}
