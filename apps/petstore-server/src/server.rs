//! HTTP application assembly and serving.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, Request, Response, StatusCode, header},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
};
use petstore::PetStoreModule;
use restkit::api::{MediaTypeMap, OpenApiRegistryImpl, media_type_middleware};
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;

use crate::config::AppConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Build the full router: pet store routes, documentation, health checks and
/// the middleware stack.
///
/// # Errors
/// Fails if the `OpenAPI` document cannot be built.
pub fn build_app(config: &AppConfig, module: &PetStoreModule) -> Result<Router> {
    let registry = OpenApiRegistryImpl::new();
    let mut router = module.register_rest(Router::new(), &registry);

    // Media-type negotiation needs the matched route, so it is a route layer
    // over the registered operations only
    if config.api.enforce_media_types {
        let map = MediaTypeMap::from_specs(&registry.operation_specs());
        tracing::debug!(operations = map.len(), "Media-type negotiation enabled");
        router = router.route_layer(from_fn(move |req, next| {
            media_type_middleware(map.clone(), req, next)
        }));
    }

    if config.api.enable_docs {
        // Build once, serve as static JSON (no per-request work)
        let info = config.api.openapi.to_info(PetStoreModule::openapi_tags());
        let doc = Arc::new(registry.build_openapi(&info)?);
        router = router.route(
            "/openapi.json",
            get(move || {
                let doc = Arc::clone(&doc);
                async move {
                    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                }
            }),
        );
    }

    router = router
        .route("/health", get(health_check))
        .route("/healthz", get(|| async { "ok" }));

    Ok(apply_middleware_stack(router, config))
}

#[derive(serde::Serialize)]
struct HealthStatus {
    status: &'static str,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

/// Layers in reverse order of execution. At runtime a request flows through
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → Router.
fn apply_middleware_stack(mut router: Router, config: &AppConfig) -> Router {
    let limit = config.api.body_limit_bytes;

    // 5) Body limit
    router = router.layer(RequestBodyLimitLayer::new(limit));
    router = router.layer(DefaultBodyLimit::max(limit));

    // 4) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        REQUEST_TIMEOUT,
    ));

    // 3) Trace
    router = apply_trace_layer(router);

    // 2) PropagateRequestId (copy request ID to response headers)
    router = router.layer(PropagateRequestIdLayer::new(request_id_header()));

    // 1) SetRequestId (registered last, runs first - outermost layer)
    router.layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(request_id_header())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &Response<axum::body::Body>, latency: Duration, span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    tracing::info!(parent: span, "request completed");
                },
            ),
    )
}

/// Bind, serve until `cancel` fires, then drain within the configured timeout.
///
/// # Errors
/// Fails when the address cannot be bound or the server errors out.
pub async fn serve(config: &AppConfig, router: Router, cancel: CancellationToken) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP server bound");

    // Graceful shutdown on cancel
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        }
    };

    let server = axum::serve(listener, router).with_graceful_shutdown(shutdown);
    let drain = Duration::from_secs(config.server.shutdown_timeout_secs);

    tokio::select! {
        result = server.into_future() => result.map_err(|e| anyhow::anyhow!(e)),
        () = async {
            cancel.cancelled().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(timeout_secs = drain.as_secs(), "Graceful shutdown timed out");
            Ok(())
        }
    }
}

/// Resolve with the name of the first process signal asking the server to stop:
/// Ctrl+C everywhere, SIGTERM on unix.
///
/// # Errors
/// Fails when a signal handler cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|()| "SIGINT")
    }
}

/// Cancel `cancel` once `signal` resolves. A failing signal source stops the
/// server too, since it could otherwise never be stopped cleanly.
pub async fn cancel_on<F>(signal: F, cancel: CancellationToken)
where
    F: Future<Output = std::io::Result<&'static str>>,
{
    match signal.await {
        Ok(name) => tracing::info!(signal = name, "Stopping pet store server"),
        Err(e) => tracing::error!(
            error = %e,
            "Cannot listen for shutdown signals; stopping pet store server"
        ),
    }
    cancel.cancel();
}
