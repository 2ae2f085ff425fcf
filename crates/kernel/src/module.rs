use async_trait::async_trait;
use axum::Router;

/// Context handed to every module while the application boots.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Schema migration contributed by a module.
///
/// `up` is executed as a raw SQL batch the first time the migration is seen;
/// the pair `(module name, id)` is what gets recorded as applied.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A resource module: owns its store, contributes routes, schema and docs.
///
/// Lifecycle: `init` → migrations → `start` → serve → `stop`.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name; also the mount point `/api/{name}`.
    fn name(&self) -> &'static str;

    /// Called once at startup, before migrations run.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes of this module, relative to `/api/{name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` + `components.schemas`) merged into the
    /// process-wide document. Paths are relative to the mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called after migrations are applied, before the server accepts traffic.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Liveness probe served at `/api/{name}/health` and folded into `/healthz`.
    async fn health(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during shutdown, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
