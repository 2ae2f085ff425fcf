#![allow(dead_code)]

use axum::{
    body::Body,
    http::{self, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use quill_app::Application;
use quill_db::Database;
use quill_kernel::settings::Settings;

pub const BOOKS: &str = "/api/books";
pub const TODOS: &str = "/api/todos";

pub async fn app_with(settings: Settings) -> Router {
    let database = Database::in_memory().await.unwrap();
    Application::with_database(settings, database)
        .await
        .unwrap()
        .router()
}

/// Application with the default settings (book fixtures seeded).
pub async fn app() -> Router {
    app_with(Settings::default()).await
}

/// Application whose book store starts empty.
pub async fn empty_app() -> Router {
    let mut settings = Settings::default();
    settings.books.seed_fixtures = false;
    app_with(settings).await
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
