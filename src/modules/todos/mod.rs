pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use quill_db::Database;
use quill_http::openapi::error_reference;
use quill_kernel::{InitCtx, Migration, Module, Store};

use crate::utils;
use store::TodoStore;

/// Todos resource backed by the `todos` table.
pub struct TodosModule {
    store: Arc<TodoStore>,
}

impl TodosModule {
    pub fn new(database: Database) -> Self {
        Self {
            store: Arc::new(TodoStore::new(database)),
        }
    }
}

#[async_trait]
impl Module for TodosModule {
    fn name(&self) -> &'static str {
        "todos"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            target: "quill.modules",
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            "todos module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn migrations(&self) -> Vec<Migration> {
        store::MIGRATIONS.to_vec()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let rows = self.store.len().await?;
        tracing::info!(module = self.name(), rows, "todos module started");
        Ok(())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let todo_id = json!({
            "name": "todo_id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let payload_body = json!({
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TodoPayload" } } }
        });
        let envelope = |description: &str| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Envelope" } } }
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List todos, optionally only the first N",
                        "tags": ["Todos"],
                        "parameters": [{
                            "name": "todos_to_return",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "integer", "minimum": 1 }
                        }],
                        "responses": {
                            "200": {
                                "description": "Todos ordered by id",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/Todo" }
                                } } }
                            },
                            "418": error_reference("Requested count was zero or negative")
                        }
                    },
                    "post": {
                        "summary": "Create a todo",
                        "tags": ["Todos"],
                        "requestBody": payload_body,
                        "responses": {
                            "201": envelope("Created"),
                            "422": error_reference("Validation error")
                        }
                    }
                },
                "/{todo_id}": {
                    "get": {
                        "summary": "Read a todo",
                        "tags": ["Todos"],
                        "parameters": [todo_id],
                        "responses": {
                            "200": {
                                "description": "The todo",
                                "content": { "application/json": { "schema": {
                                    "$ref": "#/components/schemas/Todo"
                                } } }
                            },
                            "404": error_reference("Todo not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a todo",
                        "tags": ["Todos"],
                        "parameters": [todo_id],
                        "requestBody": payload_body,
                        "responses": {
                            "200": envelope("Updated"),
                            "404": error_reference("Todo not found"),
                            "422": error_reference("Validation error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a todo",
                        "tags": ["Todos"],
                        "parameters": [todo_id],
                        "responses": {
                            "200": envelope("Deleted"),
                            "404": error_reference("Todo not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "TodoPayload": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "priority": {
                                "type": "integer",
                                "minimum": 1,
                                "maximum": 5,
                                "description": "The priority must be between 1-5"
                            },
                            "complete": { "type": "boolean" }
                        },
                        "required": ["title", "priority", "complete"]
                    },
                    "Todo": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "priority": { "type": "integer", "minimum": 1, "maximum": 5 },
                            "complete": { "type": "boolean" }
                        },
                        "required": ["id", "title", "priority", "complete"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "todos module stopped");
        Ok(())
    }
}

pub fn create_module(database: Database) -> Arc<dyn Module> {
    Arc::new(TodosModule::new(database))
}
