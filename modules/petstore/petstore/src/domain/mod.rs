//! Domain layer: pet store business rules, independent of transport and storage.

pub mod error;
pub mod repo;
pub mod seed;
pub mod service;
