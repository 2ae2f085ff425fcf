//! SQLite access for Quill: a shared connection pool, the module migration
//! runner, and the `db` core module that owns the pool's lifecycle.
//!
//! Every query checks a connection out of the pool for the duration of one
//! statement (or one transaction) and sqlx returns it on every exit path.

use std::{str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use quill_kernel::{settings::DatabaseSettings, Migration, Module};

pub mod error;
pub mod migrate;

pub use error::{DbError, DbResult};

/// Cheaply cloneable handle to the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for `settings.url`, creating the database file if needed.
    pub async fn connect(settings: &DatabaseSettings) -> DbResult<Self> {
        info!(url = %settings.url, "connecting to database");

        let options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Private in-memory database (tests, `quill openapi`). A single
    /// connection that is never recycled, since closing it drops the data.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self, migrations: &[(String, Migration)]) -> DbResult<usize> {
        migrate::apply(&self.pool, migrations).await
    }

    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Core module owning the pool: probes it for health and closes it last on
/// shutdown.
pub struct DbModule {
    database: Database,
}

impl DbModule {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn health(&self) -> anyhow::Result<()> {
        self.database.ping().await?;
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.database.close().await;
        info!(module = self.name(), "connection pool closed");
        Ok(())
    }
}

pub fn create_module(database: Database) -> Arc<dyn Module> {
    Arc::new(DbModule::new(database))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_database_answers_pings() {
        let db = Database::in_memory().await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn db_module_is_unhealthy_after_stop() {
        let db = Database::in_memory().await.unwrap();
        let module = DbModule::new(db);

        module.health().await.unwrap();
        module.stop().await.unwrap();
        assert!(module.health().await.is_err());
    }
}
