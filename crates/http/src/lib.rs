//! HTTP server facade for Quill with Axum, error translation, validating
//! extractors, and OpenAPI support.

use std::{future::Future, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use quill_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod openapi;
pub mod response;
pub mod router;

pub use error::AppError;
pub use extract::{ValidJson, ValidPath, ValidQuery};
pub use response::Envelope;
use router::RouterBuilder;

/// Serve the registry's modules until `shutdown` resolves.
pub async fn start_server<F>(
    registry: Arc<ModuleRegistry>,
    settings: &Settings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = settings.server.bind_address();
    tracing::info!(%address, "starting HTTP server");

    let app = build_router(&registry, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted and the global
/// middleware stack applied.
pub fn build_router(registry: &Arc<ModuleRegistry>, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().merge(
        Router::new()
            .route("/healthz", get(health_check))
            .with_state(Arc::clone(registry)),
    );

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /api/{}",
            module.name()
        );
        router_builder = router_builder.mount_module(module);
    }

    router_builder
        .with_openapi(openapi::merged_document(registry))
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Aggregate health: 200 `ok` when every module probe passes, otherwise 503
/// naming the failing modules.
async fn health_check(State(registry): State<Arc<ModuleRegistry>>) -> Response {
    let failures = registry.unhealthy_modules().await;
    if failures.is_empty() {
        return "ok".into_response();
    }

    for (module, error) in &failures {
        tracing::warn!(module, error = %error, "module health probe failed");
    }
    let failing: serde_json::Map<String, serde_json::Value> = failures
        .into_iter()
        .map(|(module, error)| (module.to_string(), json!(error)))
        .collect();
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "degraded", "modules": failing })),
    )
        .into_response()
}
