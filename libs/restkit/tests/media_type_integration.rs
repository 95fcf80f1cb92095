#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the media-type middleware
//!
//! Routes are registered through the operation builder, the middleware map is
//! built from the registry and installed with `route_layer`.

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
};
use restkit::api::{
    ErrorBody, MediaTypeMap, OpenApiRegistryImpl, OperationBuilder, media_type_middleware,
};
use serde::{Deserialize, Serialize};
use tower::ServiceExt; // for oneshot

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
struct Item {
    label: String,
}

async fn list_items() -> Json<Vec<Item>> {
    Json(vec![Item {
        label: "one".to_owned(),
    }])
}

async fn get_item() -> Json<Item> {
    Json(Item {
        label: "one".to_owned(),
    })
}

async fn create_item(Json(_item): Json<Item>) -> impl IntoResponse {
    StatusCode::CREATED
}

fn app() -> Router {
    let registry = OpenApiRegistryImpl::new();
    let mut router = Router::new();

    router = OperationBuilder::get("/items")
        .handler(list_items)
        .json_array_response_with_schema::<Item>(&registry, StatusCode::OK, "Items")
        .register(router, &registry);
    router = OperationBuilder::post("/items")
        .json_request::<Item>(&registry, "Item")
        .handler(create_item)
        .empty_response(StatusCode::CREATED, "Created")
        .register(router, &registry);
    router = OperationBuilder::get("/items/{itemId}")
        .path_param_typed("itemId", "Item ID", "integer")
        .handler(get_item)
        .json_response_with_schema::<Item>(&registry, StatusCode::OK, "Item")
        .register(router, &registry);

    let map = MediaTypeMap::from_specs(&registry.operation_specs());
    router
        .route_layer(axum::middleware::from_fn(move |req, next| {
            media_type_middleware(map.clone(), req, next)
        }))
        .route("/plain", get(|| async { "plain" }))
}

async fn error_body(response: axum::response::Response) -> ErrorBody {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Failed to parse error JSON")
}

#[tokio::test]
async fn json_post_passes_through() {
    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "Application/JSON; charset=utf-8")
        .body(Body::from(r#"{"label":"two"}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn non_json_post_is_rejected_with_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "text/plain")
        .body(Body::from("label=two"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let err = error_body(response).await;
    assert_eq!(err.code, 4000);
    assert_eq!(err.message, "Content-Type must be application/json");
}

#[tokio::test]
async fn get_with_html_accept_is_rejected_with_406() {
    let request = Request::builder()
        .uri("/items/7")
        .header("accept", "text/html")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let err = error_body(response).await;
    assert_eq!(err.code, 4000);
    assert_eq!(err.message, "Accept header must be application/json");
}

#[tokio::test]
async fn get_with_wildcard_or_missing_accept_passes() {
    for accept in [Some("*/*"), Some("application/json"), None] {
        let mut builder = Request::builder().uri("/items");
        if let Some(accept) = accept {
            builder = builder.header("accept", accept);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "accept: {accept:?}");
    }
}

#[tokio::test]
async fn unregistered_routes_are_untouched() {
    let request = Request::builder()
        .uri("/plain")
        .header("accept", "text/plain")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
