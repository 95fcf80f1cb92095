//! REST handlers for the petstore module.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use restkit::api::prelude::*;

use super::dto::{CreatePetReq, PetDto};
use super::error::{from_json_rejection, parse_pet_id};
use crate::domain::service::PetStoreService;

/// GET /pets
pub async fn list_pets(Extension(service): Extension<Arc<PetStoreService>>) -> impl IntoResponse {
    let pets: Vec<PetDto> = service.list().into_iter().map(Into::into).collect();
    ok_json(pets)
}

/// POST /pets
///
/// Answers `201 Created` with an empty body; the new pet is reachable under
/// the next identifier.
pub async fn create_pet(
    Extension(service): Extension<Arc<PetStoreService>>,
    body: Result<Json<CreatePetReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body.map_err(|rejection| from_json_rejection(&rejection))?;
    service.create(req.into())?;
    Ok(created_empty())
}

/// GET /pets/{petId}
pub async fn get_pet(
    Extension(service): Extension<Arc<PetStoreService>>,
    Path(pet_id): Path<String>,
) -> ApiResult<JsonBody<PetDto>> {
    let pet = service.get(parse_pet_id(&pet_id)?)?;
    Ok(Json(pet.into()))
}
