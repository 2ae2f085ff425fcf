use thiserror::Error;

use quill_kernel::StoreError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The pool could not be created or the URL was invalid.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A module migration could not be applied.
    #[error("migration {module}/{id} failed: {source}")]
    MigrationFailed {
        module: String,
        id: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::Backend(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_failures_become_store_backend_errors() {
        let err: StoreError = DbError::Query(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(err.to_string().starts_with("query failed"));
    }
}
