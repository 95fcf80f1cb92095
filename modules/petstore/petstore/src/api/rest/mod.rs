//! REST API layer for the petstore module.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
