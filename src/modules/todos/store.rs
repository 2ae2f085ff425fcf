use async_trait::async_trait;

use quill_db::{Database, DbError};
use quill_kernel::{
    store::{check_limit, Store, StoreError, StoreResult},
    Migration,
};

use super::models::{Todo, TodoPayload};

const ENTITY: &str = "todo";

/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_create_todos",
    up: r#"
        CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT    NOT NULL,
            description TEXT,
            priority    INTEGER NOT NULL CHECK (priority BETWEEN 1 AND 5),
            complete    BOOLEAN NOT NULL DEFAULT 0
        );
        "#,
}];

const COLUMNS: &str = "id, title, description, priority, complete";

/// SQL-backed todo collection. Each operation is a single statement.
#[derive(Debug, Clone)]
pub struct TodoStore {
    db: Database,
}

impl TodoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    DbError::from(err).into()
}

#[async_trait]
impl Store for TodoStore {
    type Entity = Todo;
    type Draft = TodoPayload;
    type Id = i64;

    async fn insert(&self, payload: TodoPayload) -> StoreResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title, description, priority, complete)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.priority)
        .bind(payload.complete)
        .fetch_one(self.db.pool())
        .await
        .map_err(backend)
    }

    async fn scan(&self, limit: Option<i64>) -> StoreResult<Vec<Todo>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = check_limit(ENTITY, limit)?
            .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {COLUMNS} FROM todos ORDER BY id LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(self.db.pool())
        .await
        .map_err(backend)
    }

    async fn find(&self, id: &i64) -> StoreResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn update(&self, id: &i64, payload: TodoPayload) -> StoreResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET title = ?, description = ?, priority = ?, complete = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.priority)
        .bind(payload.complete)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(backend)?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn delete(&self, id: &i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        Ok(())
    }

    async fn len(&self) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(self.db.pool())
            .await
            .map_err(backend)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
