//! Public models for the `petstore` module.
//!
//! Transport-agnostic data structures shared between the module and its
//! consumers. REST DTOs live in the module crate.

use serde::{Deserialize, Serialize};

/// Server-assigned pet identifier.
pub type PetId = i64;

/// A pet held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Input for creating a pet.
///
/// `name` is optional at this level so the store itself decides how a missing
/// name is reported; a pet is only created when it is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: Option<String>,
    pub tag: Option<String>,
}

impl NewPet {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tag: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}
