//! Type-safe API operation builder with compile-time guarantees
//!
//! This module implements a type-state builder pattern that ensures:
//! - `register()` cannot be called unless a handler is set
//! - `register()` cannot be called unless at least one response is declared
//! - Descriptive methods remain available at any stage
//! - Request bodies (`json_request`) register their schema in the `OpenAPI` components
//! - Responses can reference a schema, an array of a schema, or carry no body at all
//! - Typed Router state `S`: pass a state type once via `Router::with_state`,
//!   then use plain function handlers.

use axum::{Router, handler::Handler, routing::MethodRouter};
use http::Method;
use std::marker::PhantomData;

use crate::api::error::{APPLICATION_JSON, ErrorBody};

// Re-export from openapi_registry so route modules need a single import
pub use crate::api::openapi_registry::{OpenApiRegistry, ensure_schema};

/// Convert Axum 0.8+ style path parameters to OpenAPI-style placeholders.
///
/// Removes the asterisk prefix from Axum wildcards `{*path}`; regular
/// parameters use the same `{name}` syntax in both worlds.
///
/// ```
/// # use restkit::api::operation_builder::axum_to_openapi_path;
/// assert_eq!(axum_to_openapi_path("/pets/{petId}"), "/pets/{petId}");
/// assert_eq!(axum_to_openapi_path("/static/{*path}"), "/static/{path}");
/// ```
#[must_use]
pub fn axum_to_openapi_path(path: &str) -> String {
    path.replace("{*", "{")
}

/// Type-state markers for compile-time enforcement
pub mod state {
    /// Marker for missing required components
    #[derive(Debug, Clone, Copy)]
    pub struct Missing;

    /// Marker for present required components
    #[derive(Debug, Clone, Copy)]
    pub struct Present;
}

mod sealed {
    pub trait Sealed {}
}

/// Maps the handler state to the concrete router slot type.
/// For `Missing` there is no router slot; for `Present` it is `MethodRouter<S>`.
pub trait HandlerSlot<S>: sealed::Sealed {
    type Slot;
}

impl sealed::Sealed for Missing {}
impl sealed::Sealed for Present {}

impl<S> HandlerSlot<S> for Missing {
    type Slot = ();
}
impl<S> HandlerSlot<S> for Present {
    type Slot = MethodRouter<S>;
}

pub use state::{Missing, Present};

/// Path parameter of an operation; always required
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: String,
    pub description: Option<String>,
    pub param_type: String, // JSON Schema type (string, integer, etc.)
}

/// Request body specification for API operations
#[derive(Clone, Debug)]
pub struct RequestBodySpec {
    pub content_type: &'static str,
    pub description: Option<String>,
    /// Name of the registered component schema
    pub schema_name: String,
    pub required: bool,
}

/// Status key of a response: a concrete code or the `default` catch-all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseStatus {
    Code(u16),
    Default,
}

impl ResponseStatus {
    /// Key used under `responses` in the `OpenAPI` document.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::Code(code) => code.to_string(),
            Self::Default => "default".to_owned(),
        }
    }
}

/// What a response body refers to in `#/components/schemas`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseSchema {
    Ref(String),
    ArrayOf(String),
}

/// Response specification for API operations
#[derive(Clone, Debug)]
pub struct ResponseSpec {
    pub status: ResponseStatus,
    /// `None` for responses without a body
    pub content_type: Option<&'static str>,
    pub description: String,
    pub schema: Option<ResponseSchema>,
}

/// Operation specification collected by the builder
#[derive(Clone, Debug)]
pub struct OperationSpec {
    pub method: Method,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub params: Vec<ParamSpec>,
    pub request_body: Option<RequestBodySpec>,
    pub responses: Vec<ResponseSpec>,
    /// Internal handler id derived from method and path
    pub handler_id: String,
    /// Optional whitelist of allowed request Content-Type values (without parameters).
    /// Enforced by the media-type middleware with HTTP 415.
    pub allowed_request_content_types: Option<Vec<&'static str>>,
}

impl OperationSpec {
    /// True when any declared response carries a JSON body.
    #[must_use]
    pub fn produces_json(&self) -> bool {
        self.responses
            .iter()
            .any(|r| r.content_type == Some(APPLICATION_JSON))
    }
}

/// Type-safe operation builder with compile-time guarantees.
///
/// Generic parameters:
/// - `H`: Handler state (Missing | Present)
/// - `R`: Response state (Missing | Present)
/// - `S`: Router state type (what you put into `Router::with_state(S)`).
#[must_use]
pub struct OperationBuilder<H = Missing, R = Missing, S = ()>
where
    H: HandlerSlot<S>,
{
    spec: OperationSpec,
    method_router: <H as HandlerSlot<S>>::Slot,
    _has_handler: PhantomData<H>,
    _has_response: PhantomData<R>,
    _state: PhantomData<fn() -> S>,
}

// -------------------------------------------------------------------------------------------------
// Constructors: starts with both handler and response missing
// -------------------------------------------------------------------------------------------------
impl<S> OperationBuilder<Missing, Missing, S> {
    fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let handler_id = format!(
            "{}:{}",
            method.as_str().to_lowercase(),
            path.replace(['/', '{', '}'], "_")
        );

        Self {
            spec: OperationSpec {
                method,
                path,
                operation_id: None,
                summary: None,
                description: None,
                tags: Vec::new(),
                params: Vec::new(),
                request_body: None,
                responses: Vec::new(),
                handler_id,
                allowed_request_content_types: None,
            },
            method_router: (),
            _has_handler: PhantomData,
            _has_response: PhantomData,
            _state: PhantomData,
        }
    }

    /// Convenience constructor for GET requests
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Convenience constructor for POST requests
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }
}

// -------------------------------------------------------------------------------------------------
// Descriptive methods: available at any stage
// -------------------------------------------------------------------------------------------------
impl<H, R, S> OperationBuilder<H, R, S>
where
    H: HandlerSlot<S>,
{
    /// Inspect the spec (primarily for tests)
    pub fn spec(&self) -> &OperationSpec {
        &self.spec
    }

    /// Set the operation ID
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.spec.operation_id = Some(id.into());
        self
    }

    /// Set the operation summary
    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.spec.summary = Some(text.into());
        self
    }

    /// Set the operation description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.spec.description = Some(text.into());
        self
    }

    /// Add a tag to the operation
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.spec.tags.push(tag.into());
        self
    }

    /// Add a path parameter with an explicit JSON Schema type
    pub fn path_param_typed(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        param_type: impl Into<String>,
    ) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            description: Some(description.into()),
            param_type: param_type.into(),
        });
        self
    }

    /// Attach a JSON request body and auto-register its schema using `utoipa`.
    /// Marks the body as **required** and restricts the request Content-Type
    /// to `application/json`.
    pub fn json_request<T>(mut self, registry: &dyn OpenApiRegistry, desc: impl Into<String>) -> Self
    where
        T: utoipa::ToSchema + utoipa::PartialSchema + 'static,
    {
        let schema_name = ensure_schema::<T>(registry);
        self.spec.request_body = Some(RequestBodySpec {
            content_type: APPLICATION_JSON,
            description: Some(desc.into()),
            schema_name,
            required: true,
        });
        self.spec.allowed_request_content_types = Some(vec![APPLICATION_JSON]);
        self
    }
}

// -------------------------------------------------------------------------------------------------
// Handler setting: transitions Missing -> Present for handler
// -------------------------------------------------------------------------------------------------
impl<R, S> OperationBuilder<Missing, R, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Set the handler for this operation (function handlers are recommended).
    pub fn handler<F, T>(self, h: F) -> OperationBuilder<Present, R, S>
    where
        F: Handler<T, S> + Clone + Send + 'static,
        T: 'static,
    {
        // Only the `get` and `post` constructors exist
        let method_router = if self.spec.method == Method::POST {
            axum::routing::post(h)
        } else {
            axum::routing::get(h)
        };

        OperationBuilder {
            spec: self.spec,
            method_router,
            _has_handler: PhantomData::<Present>,
            _has_response: self._has_response,
            _state: self._state,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Responses: any response can be added at any stage; the first one flips R to Present
// -------------------------------------------------------------------------------------------------
impl<H, R, S> OperationBuilder<H, R, S>
where
    H: HandlerSlot<S>,
{
    fn push_response(mut self, resp: ResponseSpec) -> OperationBuilder<H, Present, S> {
        self.spec.responses.push(resp);
        OperationBuilder {
            spec: self.spec,
            method_router: self.method_router,
            _has_handler: self._has_handler,
            _has_response: PhantomData::<Present>,
            _state: self._state,
        }
    }

    /// Add a response without a body (e.g. `201 Created`).
    pub fn empty_response(
        self,
        status: http::StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present, S> {
        self.push_response(ResponseSpec {
            status: ResponseStatus::Code(status.as_u16()),
            content_type: None,
            description: description.into(),
            schema: None,
        })
    }

    /// Add a JSON response with a registered schema.
    pub fn json_response_with_schema<T>(
        self,
        registry: &dyn OpenApiRegistry,
        status: http::StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present, S>
    where
        T: utoipa::ToSchema + utoipa::PartialSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(ResponseSpec {
            status: ResponseStatus::Code(status.as_u16()),
            content_type: Some(APPLICATION_JSON),
            description: description.into(),
            schema: Some(ResponseSchema::Ref(name)),
        })
    }

    /// Add a JSON response whose body is an array of a registered schema.
    pub fn json_array_response_with_schema<T>(
        self,
        registry: &dyn OpenApiRegistry,
        status: http::StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present, S>
    where
        T: utoipa::ToSchema + utoipa::PartialSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(ResponseSpec {
            status: ResponseStatus::Code(status.as_u16()),
            content_type: Some(APPLICATION_JSON),
            description: description.into(),
            schema: Some(ResponseSchema::ArrayOf(name)),
        })
    }

    /// Add the catch-all `default` response carrying the shared `Error` schema.
    pub fn default_error_response(
        self,
        registry: &dyn OpenApiRegistry,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present, S> {
        let name = ensure_schema::<ErrorBody>(registry);
        self.push_response(ResponseSpec {
            status: ResponseStatus::Default,
            content_type: Some(APPLICATION_JSON),
            description: description.into(),
            schema: Some(ResponseSchema::Ref(name)),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Registration: only available when handler AND response are set
// -------------------------------------------------------------------------------------------------
impl<S> OperationBuilder<Present, Present, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Register the operation with the router and `OpenAPI` registry.
    pub fn register(self, router: Router<S>, openapi: &dyn OpenApiRegistry) -> Router<S> {
        openapi.register_operation(&self.spec);
        router.route(&self.spec.path, self.method_router)
    }
}
