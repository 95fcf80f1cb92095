//! Code-first REST toolkit.
//!
//! Routes are declared once through [`api::OperationBuilder`], which wires the
//! axum handler into the router and records the operation in an
//! [`api::OpenApiRegistry`]. The registry later renders a single `OpenAPI` 3.1
//! document for everything that was registered.

pub mod api;
pub mod result;

pub use api::{
    ApiError, ErrorBody, OpenApiInfo, OpenApiRegistry, OpenApiRegistryImpl, OperationBuilder,
    OperationSpec, TagInfo,
};
pub use result::ApiResult;
