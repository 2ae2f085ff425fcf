//! Storage contract shared by the resource modules.
//!
//! Stores trust their input: payloads are validated at the HTTP boundary
//! before they get here. Failures are returned as [`StoreError`] values and
//! only turned into transport responses by the HTTP layer.

use async_trait::async_trait;
use thiserror::Error;

/// Failures a store operation can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record carries the requested identifier.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A prefix scan was asked for zero or fewer records.
    #[error("requested {requested} {entity}s; the count must be positive")]
    NegativeCount { entity: &'static str, requested: i64 },

    /// The caller-supplied identifier is already taken.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// The backing storage failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Validate a prefix-scan limit.
///
/// `None` means "everything"; a positive value is the maximum number of
/// records to return. Zero and negative values are rejected rather than
/// clamped.
pub fn check_limit(entity: &'static str, limit: Option<i64>) -> StoreResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(requested) if requested <= 0 => Err(StoreError::NegativeCount { entity, requested }),
        Some(requested) => Ok(Some(usize::try_from(requested).unwrap_or(usize::MAX))),
    }
}

/// Identifier-keyed collection of one entity type.
///
/// `Draft` is what callers hand in on create and update (the full entity for
/// caller-keyed stores, the entity without its id for store-keyed ones).
#[async_trait]
pub trait Store: Send + Sync {
    type Entity: Send;
    type Draft: Send;
    type Id: Send + Sync;

    async fn insert(&self, draft: Self::Draft) -> StoreResult<Self::Entity>;

    /// Entities in insertion order, optionally only the first `limit`.
    async fn scan(&self, limit: Option<i64>) -> StoreResult<Vec<Self::Entity>>;

    async fn find(&self, id: &Self::Id) -> StoreResult<Self::Entity>;

    /// Replace every mutable field of the record at `id`; the id is kept.
    async fn update(&self, id: &Self::Id, draft: Self::Draft) -> StoreResult<Self::Entity>;

    async fn delete(&self, id: &Self::Id) -> StoreResult<()>;

    async fn len(&self) -> StoreResult<usize>;

    async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_means_everything() {
        assert_eq!(check_limit("book", None).unwrap(), None);
    }

    #[test]
    fn positive_limit_is_passed_through() {
        assert_eq!(check_limit("book", Some(3)).unwrap(), Some(3));
    }

    #[test]
    fn zero_and_negative_limits_are_rejected() {
        for requested in [0, -1, i64::MIN] {
            match check_limit("book", Some(requested)) {
                Err(StoreError::NegativeCount {
                    entity: "book",
                    requested: r,
                }) => assert_eq!(r, requested),
                other => panic!("expected NegativeCount, got {other:?}"),
            }
        }
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = StoreError::not_found("todo", 42);
        assert_eq!(err.to_string(), "todo not found: 42");
    }
}
