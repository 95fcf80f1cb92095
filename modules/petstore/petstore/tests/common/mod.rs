#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for petstore integration tests

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use petstore::PetStoreModule;
use restkit::api::{MediaTypeMap, OpenApiRegistryImpl, media_type_middleware};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

/// Router with the petstore routes and media-type negotiation, plus its registry.
pub fn app_with_registry() -> (Router, OpenApiRegistryImpl) {
    let registry = OpenApiRegistryImpl::new();
    let module = PetStoreModule::seeded();
    let router = module.register_rest(Router::new(), &registry);
    let map = MediaTypeMap::from_specs(&registry.operation_specs());
    let router = router.route_layer(axum::middleware::from_fn(move |req, next| {
        media_type_middleware(map.clone(), req, next)
    }));
    (router, registry)
}

pub fn app() -> Router {
    app_with_registry().0
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("accept", "application/json")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}

/// Send a request; an empty response body comes back as `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
