//! REST DTOs for the petstore module.

use petstore_sdk::{NewPet, Pet, PetId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pet as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = Pet, description = "Pet object from the store")]
pub struct PetDto {
    /// Unique identifier for the pet
    #[schema(value_type = i64)]
    pub id: PetId,
    /// Name of the pet
    pub name: String,
    /// Pet category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl From<Pet> for PetDto {
    fn from(p: Pet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            tag: p.tag,
        }
    }
}

/// Payload for creating a pet.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(as = NewPet, description = "Properties of a pet to add to the store")]
pub struct CreatePetReq {
    /// Ignored; the store assigns identifiers
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<PetId>,
    /// Name of the pet
    #[serde(default)]
    #[schema(value_type = String, required = true)]
    pub name: Option<String>,
    /// Pet category
    #[serde(default)]
    pub tag: Option<String>,
}

impl From<CreatePetReq> for NewPet {
    fn from(req: CreatePetReq) -> Self {
        Self {
            name: req.name,
            tag: req.tag,
        }
    }
}
