pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use quill_authz::HeaderCredentials;
use quill_http::openapi::error_reference;
use quill_kernel::{InitCtx, Module};

use crate::utils;
use store::BookStore;

/// In-memory books resource.
pub struct BooksModule {
    store: Arc<BookStore>,
    credentials: HeaderCredentials,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>, credentials: HeaderCredentials) -> Self {
        Self { store, credentials }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    /// Seeds the fixture books when enabled and the store is empty.
    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let seeded = if ctx.settings.books.seed_fixtures {
            self.store.seed_if_empty(&models::FIXTURES).await
        } else {
            0
        };

        tracing::info!(
            target: "quill.modules",
            prefix = %utils::log_prefix(self.name()),
            seeded,
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(routes::BooksState {
            store: Arc::clone(&self.store),
            credentials: self.credentials.clone(),
        })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_id = json!({
            "name": "book_id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        });
        let book_body = json!({
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Book" } } }
        });
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Book" } } }
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, optionally only the first N",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "books_to_return",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "integer", "minimum": 1 }
                        }],
                        "responses": {
                            "200": {
                                "description": "Books in insertion order",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/Book" }
                                } } }
                            },
                            "418": error_reference("Requested count was zero or negative")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book_body,
                        "responses": {
                            "201": book_response("Created book"),
                            "409": error_reference("A book with this id already exists"),
                            "422": error_reference("Validation error")
                        }
                    }
                },
                "/book/{book_id}": {
                    "get": {
                        "summary": "Read a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": book_response("The book"),
                            "404": error_reference("Book not found")
                        }
                    }
                },
                "/book/rating/{book_id}": {
                    "get": {
                        "summary": "Read a book without its rating",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": {
                                "description": "The book, rating omitted",
                                "content": { "application/json": { "schema": {
                                    "$ref": "#/components/schemas/BookNoRating"
                                } } }
                            },
                            "404": error_reference("Book not found")
                        }
                    }
                },
                "/login": {
                    "post": {
                        "summary": "Read a book behind the credential headers",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "book_id", "in": "query", "required": true,
                              "schema": { "type": "string", "format": "uuid" } },
                            { "name": "username", "in": "header", "required": true,
                              "schema": { "type": "string" } },
                            { "name": "password", "in": "header", "required": true,
                              "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": book_response("The book"),
                            "401": error_reference("Invalid User"),
                            "404": error_reference("Book not found")
                        }
                    }
                },
                "/{book_id}": {
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "requestBody": book_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "404": error_reference("Book not found"),
                            "422": error_reference("Validation error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": {
                                "description": "Confirmation naming the deleted id",
                                "content": { "application/json": { "schema": { "type": "string" } } }
                            },
                            "404": error_reference("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "title": { "type": "string", "minLength": 1 },
                            "author": { "type": "string", "minLength": 1, "maxLength": 100 },
                            "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                            "rating": { "type": "integer", "minimum": 0, "maximum": 100 }
                        },
                        "required": ["id", "title", "author", "rating"],
                        "example": {
                            "id": "11f4c2ea-1340-41f4-89f7-2852347bb0d1",
                            "title": "Computer Science Pro",
                            "author": "awsome author",
                            "description": "A very nice description of a book",
                            "rating": 75
                        }
                    },
                    "BookNoRating": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["id", "title", "author"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module around a fresh, empty store.
pub fn create_module(credentials: HeaderCredentials) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(BookStore::new()), credentials))
}
