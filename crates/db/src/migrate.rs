//! Applies module-contributed migrations exactly once each.
//!
//! Applied migrations are recorded in `_quill_migrations` keyed by
//! `(module, id)`. Each migration runs inside its own transaction together
//! with its bookkeeping row, so a failing batch leaves no trace.

use sqlx::SqlitePool;
use tracing::{debug, info};

use quill_kernel::Migration;

use crate::error::{DbError, DbResult};

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS _quill_migrations (
    module     TEXT NOT NULL,
    id         TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (module, id)
)";

/// Run every migration not yet recorded. Returns how many were applied.
pub async fn apply(pool: &SqlitePool, migrations: &[(String, Migration)]) -> DbResult<usize> {
    sqlx::query(LEDGER_DDL).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM _quill_migrations WHERE module = ? AND id = ?")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await?;
        if already.is_some() {
            debug!(module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let failed = |source| DbError::MigrationFailed {
            module: module.clone(),
            id: migration.id.to_string(),
            source,
        };

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        sqlx::query("INSERT INTO _quill_migrations (module, id) VALUES (?, ?)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
