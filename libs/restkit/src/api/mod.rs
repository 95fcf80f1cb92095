//! REST API building blocks: operation builder, `OpenAPI` registry, JSON errors
//! and media-type negotiation.

pub mod error;
pub mod media_type;
pub mod openapi_registry;
pub mod operation_builder;
pub mod response;

pub use error::{APPLICATION_JSON, ApiError, ErrorBody};
pub use media_type::{MEDIA_TYPE_ERROR_CODE, MediaTypeMap, media_type_middleware};
pub use openapi_registry::{OpenApiInfo, OpenApiRegistry, OpenApiRegistryImpl, TagInfo, ensure_schema};
pub use operation_builder::{
    Missing, OperationBuilder, OperationSpec, ParamSpec, Present, ResponseSchema,
    ResponseSpec, ResponseStatus, state,
};

/// Prelude module that re-exports common API types for handler authors
pub mod prelude {
    pub use crate::result::ApiResult;

    pub use super::error::ApiError;

    pub use super::response::{JsonBody, created_empty, ok_json};

    // Useful axum bits (common in handlers)
    pub use axum::{Json, http::StatusCode, response::IntoResponse};
}
