use axum::{Json, http::StatusCode, response::IntoResponse};

/// Short alias for JSON responses
pub type JsonBody<T> = Json<T>;

/// 200 OK + JSON
pub fn ok_json<T: serde::Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::OK, Json(value))
}

/// 201 Created with no body
#[must_use]
pub fn created_empty() -> impl IntoResponse {
    StatusCode::CREATED
}
