//! Media-type negotiation middleware.
//!
//! Operations registered through the builder declare what they consume and
//! produce. This middleware enforces both sides before the handler runs:
//! - a request to an operation with an allowed Content-Type list must carry
//!   one of those types, otherwise `415 Unsupported Media Type`;
//! - a request to an operation that produces JSON and carries an `Accept`
//!   header must accept JSON, otherwise `406 Not Acceptable`.
//!
//! Routes that were not registered through the builder pass through untouched.

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderMap, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{APPLICATION_JSON, ApiError};
use crate::api::operation_builder::OperationSpec;

/// Error code shared by every media-type rejection.
pub const MEDIA_TYPE_ERROR_CODE: i32 = 4000;

#[derive(Debug, Clone, Default)]
struct MediaRule {
    /// Lowercased media types, `None` when any Content-Type is accepted
    consumes: Option<Vec<String>>,
    produces_json: bool,
}

/// Per-operation media rules keyed by method and route pattern.
#[derive(Debug, Clone, Default)]
pub struct MediaTypeMap {
    rules: Arc<HashMap<(Method, String), MediaRule>>,
}

impl MediaTypeMap {
    /// Build the map from registered operation specs.
    #[must_use]
    pub fn from_specs(specs: &[OperationSpec]) -> Self {
        let rules = specs
            .iter()
            .map(|spec| {
                let rule = MediaRule {
                    consumes: spec
                        .allowed_request_content_types
                        .as_ref()
                        .map(|types| types.iter().map(|t| t.to_ascii_lowercase()).collect()),
                    // Only reads are negotiated; writes answer without a body
                    produces_json: spec.method == Method::GET && spec.produces_json(),
                };
                ((spec.method.clone(), spec.path.clone()), rule)
            })
            .collect();
        Self {
            rules: Arc::new(rules),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check request headers against the rule of the given operation.
    ///
    /// # Errors
    /// Returns the 415 or 406 [`ApiError`] the client should receive.
    pub fn check(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(rule) = self.rules.get(&(method.clone(), path.to_owned())) else {
            return Ok(());
        };

        if let Some(allowed) = &rule.consumes {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(essence);
            match content_type {
                Some(ct) if allowed.iter().any(|a| *a == ct) => {}
                other => {
                    tracing::debug!(
                        content_type = other.as_deref().unwrap_or("<missing>"),
                        "Rejecting request body media type"
                    );
                    return Err(ApiError::new(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        MEDIA_TYPE_ERROR_CODE,
                        "Content-Type must be application/json",
                    ));
                }
            }
        }

        if rule.produces_json {
            let accepts: Vec<_> = headers.get_all(header::ACCEPT).iter().collect();
            let ok = accepts.iter().any(|v| v.to_str().is_ok_and(accepts_json));
            if !accepts.is_empty() && !ok {
                tracing::debug!("Rejecting request whose Accept header excludes JSON");
                return Err(ApiError::new(
                    StatusCode::NOT_ACCEPTABLE,
                    MEDIA_TYPE_ERROR_CODE,
                    "Accept header must be application/json",
                ));
            }
        }

        Ok(())
    }
}

/// Media type without parameters, lowercased: `Application/JSON; charset=utf-8` -> `application/json`.
fn essence(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// True when any entry of an `Accept` header value admits JSON. Q-values are ignored.
fn accepts_json(raw: &str) -> bool {
    raw.split(',').map(essence).any(|range| {
        range == APPLICATION_JSON || range == "application/*" || range == "*/*"
    })
}

/// Axum middleware enforcing the rules in `map`.
///
/// Install with `Router::route_layer` so the matched route pattern is available.
pub async fn media_type_middleware(map: MediaTypeMap, req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    match map.check(req.method(), &path, req.headers()) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn essence_strips_parameters_and_case() {
        assert_eq!(essence("Application/JSON; charset=utf-8"), "application/json");
        assert_eq!(essence(" text/plain "), "text/plain");
        assert_eq!(essence(""), "");
    }

    #[test]
    fn accept_ranges() {
        assert!(accepts_json("application/json"));
        assert!(accepts_json("text/html, application/json;q=0.9"));
        assert!(accepts_json("*/*"));
        assert!(accepts_json("application/*"));
        assert!(!accepts_json("text/html"));
        assert!(!accepts_json("application/xml, text/*"));
    }

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(k.clone(), HeaderValue::from_static(v));
        }
        map
    }

    fn spec(method: Method, path: &str, consumes: Option<Vec<&'static str>>) -> OperationSpec {
        use crate::api::operation_builder::{ResponseSpec, ResponseStatus};
        OperationSpec {
            method,
            path: path.to_owned(),
            operation_id: None,
            summary: None,
            description: None,
            tags: vec![],
            params: vec![],
            request_body: None,
            responses: vec![ResponseSpec {
                status: ResponseStatus::Code(200),
                content_type: Some(APPLICATION_JSON),
                description: "ok".to_owned(),
                schema: None,
            }],
            handler_id: "h".to_owned(),
            allowed_request_content_types: consumes,
        }
    }

    #[test]
    fn content_type_rules() {
        let map = MediaTypeMap::from_specs(&[spec(
            Method::POST,
            "/items",
            Some(vec![APPLICATION_JSON]),
        )]);

        assert!(
            map.check(
                &Method::POST,
                "/items",
                &headers(&[(header::CONTENT_TYPE, "application/json; charset=utf-8")])
            )
            .is_ok()
        );

        let err = map
            .check(
                &Method::POST,
                "/items",
                &headers(&[(header::CONTENT_TYPE, "text/plain")]),
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.code, MEDIA_TYPE_ERROR_CODE);

        let err = map.check(&Method::POST, "/items", &HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        // POST does not negotiate Accept
        assert!(
            map.check(
                &Method::POST,
                "/items",
                &headers(&[
                    (header::CONTENT_TYPE, "application/json"),
                    (header::ACCEPT, "text/html")
                ])
            )
            .is_ok()
        );
    }

    #[test]
    fn accept_rules() {
        let map = MediaTypeMap::from_specs(&[spec(Method::GET, "/items", None)]);

        assert!(map.check(&Method::GET, "/items", &HeaderMap::new()).is_ok());
        assert!(
            map.check(
                &Method::GET,
                "/items",
                &headers(&[(header::ACCEPT, "text/html"), (header::ACCEPT, "*/*")])
            )
            .is_ok()
        );

        let err = map
            .check(
                &Method::GET,
                "/items",
                &headers(&[(header::ACCEPT, "text/html")]),
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(err.message, "Accept header must be application/json");
    }

    #[test]
    fn unknown_operations_pass() {
        let map = MediaTypeMap::from_specs(&[]);
        assert!(map.is_empty());
        assert!(
            map.check(
                &Method::GET,
                "/health",
                &headers(&[(header::ACCEPT, "text/plain")])
            )
            .is_ok()
        );
    }
}
