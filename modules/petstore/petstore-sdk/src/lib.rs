//! Petstore SDK
//!
//! This crate provides the public API for the `petstore` module:
//! - `PetStoreClient` trait for in-process consumers
//! - `Pet` and `NewPet` models
//! - `PetStoreError` for error handling
//!
//! ## Usage
//!
//! ```ignore
//! use petstore_sdk::{NewPet, PetStoreClient};
//!
//! let pet = client.create_pet(NewPet::named("Fido").with_tag("Loyal")).await?;
//! let same = client.get_pet(pet.id).await?;
//! let all = client.list_pets().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::PetStoreClient;
pub use error::PetStoreError;
pub use models::{NewPet, Pet, PetId};
