//! HTTP handlers for the books resource.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use quill_authz::HeaderCredentials;
use quill_http::{AppError, ValidJson, ValidPath, ValidQuery};
use quill_kernel::Store;

use super::{
    models::{Book, BookNoRating, ListBooks, LoginQuery},
    store::BookStore,
};

#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<BookStore>,
    pub credentials: HeaderCredentials,
}

pub fn router(state: BooksState) -> Router {
    Router::new()
        .route("/", get(read_all_books).post(create_book))
        .route("/book/{book_id}", get(read_book))
        .route("/book/rating/{book_id}", get(read_book_no_rating))
        .route("/login", post(book_login))
        .route("/{book_id}", put(update_book).delete(delete_book))
        .with_state(state)
}

async fn create_book(
    State(state): State<BooksState>,
    ValidJson(book): ValidJson<Book>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = state.store.insert(book).await?;
    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn read_all_books(
    State(state): State<BooksState>,
    ValidQuery(query): ValidQuery<ListBooks>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.store.scan(query.books_to_return).await?;
    Ok(Json(books))
}

async fn read_book(
    State(state): State<BooksState>,
    ValidPath(book_id): ValidPath<Uuid>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(state.store.find(&book_id).await?))
}

async fn read_book_no_rating(
    State(state): State<BooksState>,
    ValidPath(book_id): ValidPath<Uuid>,
) -> Result<Json<BookNoRating>, AppError> {
    let book = state.store.find(&book_id).await?;
    Ok(Json(BookNoRating::from(book)))
}

/// Identifier-keyed lookup behind the header credential check.
async fn book_login(
    State(state): State<BooksState>,
    ValidQuery(query): ValidQuery<LoginQuery>,
    headers: HeaderMap,
) -> Result<Json<Book>, AppError> {
    if let Err(err) = state.credentials.authorize(&headers) {
        tracing::info!(book_id = %query.book_id, reason = %err, "book login refused");
        return Err(AppError::unauthorized("Invalid User"));
    }
    Ok(Json(state.store.find(&query.book_id).await?))
}

async fn update_book(
    State(state): State<BooksState>,
    ValidPath(book_id): ValidPath<Uuid>,
    ValidJson(book): ValidJson<Book>,
) -> Result<Json<Book>, AppError> {
    let book = state.store.update(&book_id, book).await?;
    tracing::info!(book_id = %book.id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(state): State<BooksState>,
    ValidPath(book_id): ValidPath<Uuid>,
) -> Result<Json<String>, AppError> {
    state.store.delete(&book_id).await?;
    tracing::info!(book_id = %book_id, "book deleted");
    Ok(Json(format!("ID:{book_id} deleted")))
}
