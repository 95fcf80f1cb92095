//! Petstore module.
//!
//! An in-memory collection of pets exposed over REST:
//! - `GET /pets` lists every pet
//! - `POST /pets` creates a pet
//! - `GET /pets/{petId}` retrieves one pet
//!
//! [`PetStoreModule`] owns the store. The server builds one at startup and
//! mounts its routes; in-process consumers use [`PetStoreModule::client`].

#![forbid(unsafe_code)]

pub mod api;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod local_client;
pub mod module;

pub use module::PetStoreModule;
