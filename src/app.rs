//! Application bootstrap: settings → database → modules → HTTP server.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use quill_db::Database;
use quill_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A fully initialized application: modules registered and initialized,
/// migrations applied, modules started.
pub struct Application {
    settings: Settings,
    registry: Arc<ModuleRegistry>,
}

impl Application {
    /// Connect to the configured database and bring every module up.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let database = Database::connect(&settings.database)
            .await
            .with_context(|| "failed to connect to the database")?;
        Self::with_database(settings, database).await
    }

    /// Bring every module up against an already opened database.
    pub async fn with_database(settings: Settings, database: Database) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &settings, &database);

        let ctx = InitCtx {
            settings: &settings,
        };
        registry.init_all(&ctx).await?;

        let applied = database
            .migrate(&registry.collect_migrations())
            .await
            .with_context(|| "failed to apply migrations")?;
        tracing::info!(applied, "migrations complete");

        registry.start_all(&ctx).await?;

        Ok(Self {
            settings,
            registry: Arc::new(registry),
        })
    }

    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// The complete HTTP router, middleware included.
    pub fn router(&self) -> Router {
        quill_http::build_router(&self.registry, &self.settings)
    }

    /// Serve until `shutdown` resolves, then stop every module.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let served =
            quill_http::start_server(Arc::clone(&self.registry), &self.settings, shutdown).await;
        let stopped = self.registry.stop_all().await;
        served?;
        stopped
    }
}

/// Run the service until Ctrl-C.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "quill bootstrap starting"
    );
    Application::build(settings)
        .await?
        .run_until(shutdown_signal())
        .await
}

/// Apply pending module migrations and exit. Returns how many were applied.
pub async fn migrate(settings: Settings) -> anyhow::Result<usize> {
    let database = Database::connect(&settings.database)
        .await
        .with_context(|| "failed to connect to the database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings, &database);

    let applied = database
        .migrate(&registry.collect_migrations())
        .await
        .with_context(|| "failed to apply migrations")?;
    database.close().await;
    Ok(applied)
}

/// The merged OpenAPI document, built without touching the configured
/// database.
pub async fn openapi_document(settings: Settings) -> anyhow::Result<serde_json::Value> {
    let database = Database::in_memory().await?;
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings, &database);
    Ok(quill_http::openapi::merged_document(&registry))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
