use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_kernel::store::{check_limit, Store, StoreError, StoreResult};

use super::models::Book;

const ENTITY: &str = "book";

/// Process-wide in-memory book collection, kept in insertion order.
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().collect()),
        }
    }

    /// Insert `books` only if the store holds nothing yet. Returns how many
    /// were inserted.
    pub async fn seed_if_empty(&self, books: &[Book]) -> usize {
        let mut current = self.books.write().await;
        if !current.is_empty() {
            return 0;
        }
        current.extend(books.iter().cloned());
        books.len()
    }
}

#[async_trait]
impl Store for BookStore {
    type Entity = Book;
    type Draft = Book;
    type Id = Uuid;

    async fn insert(&self, book: Book) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id == book.id) {
            return Err(StoreError::duplicate(ENTITY, book.id));
        }
        books.push(book.clone());
        Ok(book)
    }

    async fn scan(&self, limit: Option<i64>) -> StoreResult<Vec<Book>> {
        let limit = check_limit(ENTITY, limit)?;
        let books = self.books.read().await;
        let take = limit.unwrap_or(books.len());
        Ok(books.iter().take(take).cloned().collect())
    }

    async fn find(&self, id: &Uuid) -> StoreResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn update(&self, id: &Uuid, draft: Book) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|book| book.id == *id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        *slot = Book { id: *id, ..draft };
        Ok(slot.clone())
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<()> {
        let mut books = self.books.write().await;
        let position = books
            .iter()
            .position(|book| book.id == *id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        books.remove(position);
        Ok(())
    }

    async fn len(&self) -> StoreResult<usize> {
        Ok(self.books.read().await.len())
    }
}
