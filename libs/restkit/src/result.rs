//! Ergonomic result type for API handlers.

use crate::api::error::ApiError;

/// Standard result type for API operations
///
/// ```ignore
/// async fn handler() -> ApiResult<Json<Pet>> {
///     let pet = svc.get_pet(id)?;  // domain errors convert into ApiError
///     Ok(Json(pet.into()))
/// }
/// ```
///
/// `ApiError` implements `IntoResponse`, so axum turns the error side into
/// the JSON error body automatically.
pub type ApiResult<T = ()> = Result<T, ApiError>;
