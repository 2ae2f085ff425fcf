//! HTTP handlers for the todos resource. Mutations answer with the
//! success envelope instead of the row.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use quill_http::{AppError, Envelope, ValidJson, ValidPath, ValidQuery};
use quill_kernel::Store;

use super::{
    models::{ListTodos, Todo, TodoPayload},
    store::TodoStore,
};

pub fn router(store: Arc<TodoStore>) -> Router {
    Router::new()
        .route("/", get(read_all).post(create_todo))
        .route(
            "/{todo_id}",
            get(read_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(store)
}

async fn create_todo(
    State(store): State<Arc<TodoStore>>,
    ValidJson(todo): ValidJson<TodoPayload>,
) -> Result<Envelope, AppError> {
    let todo = store.insert(todo).await?;
    tracing::info!(todo_id = todo.id, "todo created");
    Ok(Envelope::successful(StatusCode::CREATED))
}

async fn read_all(
    State(store): State<Arc<TodoStore>>,
    ValidQuery(query): ValidQuery<ListTodos>,
) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(store.scan(query.todos_to_return).await?))
}

async fn read_todo(
    State(store): State<Arc<TodoStore>>,
    ValidPath(todo_id): ValidPath<i64>,
) -> Result<Json<Todo>, AppError> {
    Ok(Json(store.find(&todo_id).await?))
}

async fn update_todo(
    State(store): State<Arc<TodoStore>>,
    ValidPath(todo_id): ValidPath<i64>,
    ValidJson(todo): ValidJson<TodoPayload>,
) -> Result<Envelope, AppError> {
    store.update(&todo_id, todo).await?;
    tracing::info!(todo_id, "todo updated");
    Ok(Envelope::successful(StatusCode::OK))
}

async fn delete_todo(
    State(store): State<Arc<TodoStore>>,
    ValidPath(todo_id): ValidPath<i64>,
) -> Result<Envelope, AppError> {
    store.delete(&todo_id).await?;
    tracing::info!(todo_id, "todo deleted");
    Ok(Envelope::successful(StatusCode::OK))
}
