//! `OpenAPI` registry for schema and operation management.
//!
//! Route modules register their operations through [`OpenApiRegistry::register_operation`]
//! and the types they exchange through [`ensure_schema`]. Once every route is
//! registered, [`OpenApiRegistryImpl::build_openapi`] aggregates everything into
//! an `OpenAPI` 3.1 document.

use anyhow::Result;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    info::InfoBuilder,
    path::{
        HttpMethod, OperationBuilder as UOperationBuilder, ParameterBuilder, ParameterIn,
        PathItemBuilder, PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    response::{ResponseBuilder, ResponsesBuilder},
    schema::{AdditionalProperties, Array, ComponentsBuilder, ObjectBuilder, Schema, SchemaType, Type},
    tag::TagBuilder,
};

use crate::api::operation_builder::{self, ResponseSchema};

/// Type alias for schema collections used in API operations.
type SchemaCollection = Vec<(String, RefOr<Schema>)>;

/// A root-level tag with its human readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub description: Option<String>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// `OpenAPI` document metadata
#[derive(Debug, Clone)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Root `tags` section, emitted in the given order
    pub tags: Vec<TagInfo>,
    /// Close every object schema in `components` with `additionalProperties: false`
    pub seal_schemas: bool,
}

impl Default for OpenApiInfo {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_owned(),
            version: "0.1.0".to_owned(),
            description: None,
            tags: Vec::new(),
            seal_schemas: false,
        }
    }
}

/// Interface for registering API operations and schemas.
///
/// Route modules depend on this trait only, so they never see the concrete
/// storage used by the server.
pub trait OpenApiRegistry: Send + Sync {
    /// Register an API operation specification
    fn register_operation(&self, spec: &operation_builder::OperationSpec);

    /// Ensure schema for a type (including transitive dependencies) is registered
    /// under components and return the canonical component name for `$ref`.
    /// This is a type-erased version for dyn compatibility.
    fn ensure_schema_raw(&self, name: &str, schemas: SchemaCollection) -> String;
}

/// Registers a type and its dependencies into the registry.
///
/// Returns the component name to use in `$ref`.
pub fn ensure_schema<T: utoipa::ToSchema + utoipa::PartialSchema + 'static>(
    registry: &dyn OpenApiRegistry,
) -> String {
    use utoipa::PartialSchema;

    // Canonical component name for T as seen by utoipa
    let root_name = T::name().to_string();

    // T's own schema goes first (actual object, not a ref), then its dependencies
    let mut collected: SchemaCollection =
        vec![(root_name.clone(), <T as PartialSchema>::schema())];
    T::schemas(&mut collected);

    registry.ensure_schema_raw(&root_name, collected)
}

/// Thread-safe implementation of the `OpenAPI` registry.
pub struct OpenApiRegistryImpl {
    /// Operation specs keyed by "METHOD:path"
    pub operation_specs: DashMap<String, operation_builder::OperationSpec>,
    /// Schema components, swapped wholesale on every update
    pub components_registry: ArcSwap<HashMap<String, RefOr<Schema>>>,
}

impl OpenApiRegistryImpl {
    #[must_use]
    pub fn new() -> Self {
        Self {
            operation_specs: DashMap::new(),
            components_registry: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Snapshot of the registered operations ordered by path, then method.
    #[must_use]
    pub fn operation_specs(&self) -> Vec<operation_builder::OperationSpec> {
        let mut specs: Vec<_> = self
            .operation_specs
            .iter()
            .map(|e| e.value().clone())
            .collect();
        specs.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        specs
    }

    /// Generates the complete `OpenAPI` document.
    ///
    /// # Errors
    /// Returns an error if an operation uses an HTTP method `OpenAPI` cannot describe.
    pub fn build_openapi(&self, info: &OpenApiInfo) -> Result<OpenApi> {
        let specs = self.operation_specs();
        tracing::info!(
            operations = specs.len(),
            "Building OpenAPI document from registered operations"
        );

        // 1) Paths
        let mut paths = PathsBuilder::new();
        for spec in &specs {
            let method = http_method(&spec.method)?;
            let item = PathItemBuilder::new()
                .operation(method, build_operation(spec))
                .build();
            paths = paths.path(operation_builder::axum_to_openapi_path(&spec.path), item);
        }

        // 2) Components
        let mut components = ComponentsBuilder::new();
        for (name, schema) in self.components_registry.load().iter() {
            let mut schema = schema.clone();
            if info.seal_schemas {
                seal(&mut schema);
            }
            components = components.schema(name.clone(), schema);
        }

        // 3) Info, tags & final document
        let openapi_info = InfoBuilder::new()
            .title(&info.title)
            .version(&info.version)
            .description(info.description.clone())
            .build();

        let tags = (!info.tags.is_empty()).then(|| {
            info.tags
                .iter()
                .map(|t| {
                    TagBuilder::new()
                        .name(&t.name)
                        .description(t.description.clone())
                        .build()
                })
                .collect::<Vec<_>>()
        });

        Ok(OpenApiBuilder::new()
            .info(openapi_info)
            .paths(paths.build())
            .components(Some(components.build()))
            .tags(tags)
            .build())
    }
}

fn http_method(method: &http::Method) -> Result<HttpMethod> {
    Ok(match *method {
        http::Method::GET => HttpMethod::Get,
        http::Method::POST => HttpMethod::Post,
        ref other => anyhow::bail!("unsupported HTTP method in OpenAPI: {other}"),
    })
}

fn build_operation(spec: &operation_builder::OperationSpec) -> utoipa::openapi::path::Operation {
    let mut op = UOperationBuilder::new()
        .operation_id(spec.operation_id.clone().or(Some(spec.handler_id.clone())))
        .summary(spec.summary.clone())
        .description(spec.description.clone());

    for tag in &spec.tags {
        op = op.tag(tag.clone());
    }

    for p in &spec.params {
        let schema_type = match p.param_type.as_str() {
            "integer" => Type::Integer,
            "number" => Type::Number,
            "boolean" => Type::Boolean,
            _ => Type::String,
        };
        let schema = Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(schema_type))
                .build(),
        );

        op = op.parameter(
            ParameterBuilder::new()
                .name(&p.name)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(p.description.clone())
                .schema(Some(schema))
                .build(),
        );
    }

    if let Some(rb) = &spec.request_body {
        let content = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::from_schema_name(rb.schema_name.clone()))))
            .build();
        let mut rbld = RequestBodyBuilder::new()
            .description(rb.description.clone())
            .content(rb.content_type.to_owned(), content);
        if rb.required {
            rbld = rbld.required(Some(Required::True));
        }
        op = op.request_body(Some(rbld.build()));
    }

    let mut responses = ResponsesBuilder::new();
    for r in &spec.responses {
        let mut resp = ResponseBuilder::new().description(&r.description);
        if let Some(content_type) = r.content_type {
            let schema: RefOr<Schema> = match &r.schema {
                Some(ResponseSchema::Ref(name)) => RefOr::Ref(Ref::from_schema_name(name.clone())),
                Some(ResponseSchema::ArrayOf(name)) => RefOr::T(Schema::Array(Array::new(
                    RefOr::Ref(Ref::from_schema_name(name.clone())),
                ))),
                None => RefOr::T(Schema::Object(ObjectBuilder::new().build())),
            };
            resp = resp.content(
                content_type,
                ContentBuilder::new().schema(Some(schema)).build(),
            );
        }
        responses = responses.response(r.status.key(), resp.build());
    }

    op.responses(responses.build()).build()
}

/// Forbid undeclared properties on an object schema. Scalar schemas are left untouched.
fn seal(schema: &mut RefOr<Schema>) {
    if let RefOr::T(Schema::Object(obj)) = schema
        && obj.schema_type == SchemaType::Type(Type::Object)
    {
        obj.additional_properties = Some(Box::new(AdditionalProperties::FreeForm(false)));
    }
}

impl Default for OpenApiRegistryImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiRegistry for OpenApiRegistryImpl {
    fn register_operation(&self, spec: &operation_builder::OperationSpec) {
        let operation_key = format!("{}:{}", spec.method.as_str(), spec.path);
        self.operation_specs
            .insert(operation_key.clone(), spec.clone());

        tracing::debug!(
            handler_id = %spec.handler_id,
            method = %spec.method.as_str(),
            path = %spec.path,
            summary = %spec.summary.as_deref().unwrap_or("No summary"),
            operation_key = %operation_key,
            "Registered API operation in registry"
        );
    }

    fn ensure_schema_raw(&self, root_name: &str, schemas: SchemaCollection) -> String {
        // Snapshot & copy-on-write
        let current = self.components_registry.load();
        let mut reg = (**current).clone();

        for (name, schema) in schemas {
            // Conflict policy: identical → no-op; different → warn & override
            if let Some(existing) = reg.get(&name) {
                let a = serde_json::to_value(existing).ok();
                let b = serde_json::to_value(&schema).ok();
                if a == b {
                    continue;
                }
                tracing::warn!(%name, "Schema content conflict; overriding with latest");
            }
            reg.insert(name, schema);
        }

        self.components_registry.store(Arc::new(reg));
        root_name.to_owned()
    }
}
