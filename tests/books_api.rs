mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use quill_app::modules::books::models::{Book, FIXTURES};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use common::{app, body_json, empty_app, json_request, request, BOOKS};

const U1: &str = "0b6e5b4c-4a4e-4f7c-9d59-1d5f3c1e2a01";

fn book_json(id: &str, title: &str, rating: i64) -> String {
    format!(r#"{{"id":"{id}","title":"{title}","author":"B","rating":{rating}}}"#)
}

fn login(book_id: &str, username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("{BOOKS}/login?book_id={book_id}"))
        .header("username", username)
        .header("password", password)
        .body(Body::empty())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn fresh_service_lists_the_four_seeded_books() {
    let resp = app().await.oneshot(request("GET", BOOKS)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books, *FIXTURES);
}

#[tokio::test]
async fn seeding_can_be_disabled() {
    let resp = empty_app().await.oneshot(request("GET", BOOKS)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Book> = body_json(resp).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn books_to_return_selects_a_prefix() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("{BOOKS}?books_to_return=2")))
        .await
        .unwrap();
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books, FIXTURES[..2].to_vec());

    let resp = app
        .oneshot(request("GET", &format!("{BOOKS}?books_to_return=10")))
        .await
        .unwrap();
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books.len(), 4);
}

#[tokio::test]
async fn negative_count_is_a_teapot() {
    let resp = app()
        .await
        .oneshot(request("GET", &format!("{BOOKS}?books_to_return=-1")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = body_json(resp).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("-1"));
}

#[tokio::test]
async fn zero_count_is_also_rejected() {
    let resp = app()
        .await
        .oneshot(request("GET", &format!("{BOOKS}?books_to_return=0")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
}

// --- create / read ---

#[tokio::test]
async fn create_then_read_returns_the_same_fields() {
    let app = empty_app().await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", BOOKS, &book_json(U1, "A", 50)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Book = body_json(resp).await;

    let resp = app
        .oneshot(request("GET", &format!("{BOOKS}/book/{U1}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Book = body_json(resp).await;

    assert_eq!(fetched, created);
    assert_eq!(fetched.id, Uuid::parse_str(U1).unwrap());
    assert_eq!(fetched.title, "A");
    assert_eq!(fetched.author, "B");
    assert_eq!(fetched.description, None);
    assert_eq!(fetched.rating, 50);
}

#[tokio::test]
async fn invalid_payloads_are_422() {
    let app = empty_app().await;
    let cases = [
        book_json(U1, "A", 101),
        book_json(U1, "A", -1),
        book_json(U1, "", 50),
        book_json("not-a-uuid", "A", 50),
        format!(
            r#"{{"id":"{U1}","title":"A","author":"{}","rating":5}}"#,
            "x".repeat(101)
        ),
        format!(r#"{{"id":"{U1}","title":"A","author":"B","description":"","rating":5}}"#),
        r#"{"title":"A","author":"B","rating":5}"#.to_string(),
    ];

    for body in cases {
        let resp = app
            .clone()
            .oneshot(json_request("POST", BOOKS, &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    }

    let resp = app.oneshot(request("GET", BOOKS)).await.unwrap();
    let books: Vec<Book> = body_json(resp).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let app = empty_app().await;
    let body = book_json(U1, "A", 50);

    let first = app
        .clone()
        .oneshot(json_request("POST", BOOKS, &body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(json_request("POST", BOOKS, &body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_book_is_404_with_header() {
    let resp = app()
        .await
        .oneshot(request("GET", &format!("{BOOKS}/book/{U1}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-header-error"));
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"]["message"], "Book not found");
}

#[tokio::test]
async fn malformed_path_id_is_422() {
    let resp = app()
        .await
        .oneshot(request("GET", &format!("{BOOKS}/book/not-a-uuid")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn rating_view_omits_the_rating() {
    let id = FIXTURES[0].id;
    let resp = app()
        .await
        .oneshot(request("GET", &format!("{BOOKS}/book/rating/{id}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["title"], "Title 1");
    assert!(body.get("rating").is_none());
}

// --- update ---

#[tokio::test]
async fn update_replaces_the_record_and_keeps_the_path_id() {
    let app = app().await;
    let id = FIXTURES[1].id;
    let other = Uuid::new_v4();
    let body = format!(
        r#"{{"id":"{other}","title":"Renamed","author":"New Author","description":"New","rating":1}}"#
    );

    let resp = app
        .clone()
        .oneshot(json_request("PUT", &format!("{BOOKS}/{id}"), &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Book = body_json(resp).await;
    assert_eq!(updated.id, id);

    let resp = app
        .oneshot(request("GET", &format!("{BOOKS}/book/{id}")))
        .await
        .unwrap();
    let fetched: Book = body_json(resp).await;
    assert_eq!(
        fetched,
        Book {
            id,
            title: "Renamed".to_string(),
            author: "New Author".to_string(),
            description: Some("New".to_string()),
            rating: 1,
        }
    );
}

#[tokio::test]
async fn update_of_unknown_book_is_404() {
    let resp = app()
        .await
        .oneshot(json_request(
            "PUT",
            &format!("{BOOKS}/{U1}"),
            &book_json(U1, "A", 50),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_update_leaves_the_record_alone() {
    let app = app().await;
    let id = FIXTURES[0].id;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{BOOKS}/{id}"),
            &book_json(&id.to_string(), "A", 500),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = app
        .oneshot(request("GET", &format!("{BOOKS}/book/{id}")))
        .await
        .unwrap();
    let fetched: Book = body_json(resp).await;
    assert_eq!(fetched, FIXTURES[0]);
}

// --- delete ---

#[tokio::test]
async fn delete_then_read_is_404() {
    let app = empty_app().await;
    app.clone()
        .oneshot(json_request("POST", BOOKS, &book_json(U1, "A", 50)))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(request("DELETE", &format!("{BOOKS}/{U1}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let confirmation: String = body_json(resp).await;
    assert_eq!(confirmation, format!("ID:{U1} deleted"));

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("{BOOKS}/book/{U1}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(request("DELETE", &format!("{BOOKS}/{U1}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- gated lookup ---

#[tokio::test]
async fn login_with_valid_credentials_returns_the_book() {
    let id = FIXTURES[2].id.to_string();
    let resp = app()
        .await
        .oneshot(login(&id, "FastAPIUser", "test1234!"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let book: Book = body_json(resp).await;
    assert_eq!(book, FIXTURES[2]);
}

#[tokio::test]
async fn login_with_bad_credentials_is_refused() {
    let id = FIXTURES[2].id.to_string();
    let resp = app()
        .await
        .oneshot(login(&id, "FastAPIUser", "wrong"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"]["message"], "Invalid User");
}

#[tokio::test]
async fn login_lookup_is_by_identifier_even_after_deletes() {
    let app = app().await;
    let first = FIXTURES[0].id;
    let third = FIXTURES[2].id.to_string();

    app.clone()
        .oneshot(request("DELETE", &format!("{BOOKS}/{first}")))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(login(&third, "FastAPIUser", "test1234!"))
        .await
        .unwrap();
    let book: Book = body_json(resp).await;
    assert_eq!(book, FIXTURES[2]);

    let resp = app
        .oneshot(login(&first.to_string(), "FastAPIUser", "test1234!"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- health ---

#[tokio::test]
async fn health_endpoints_answer() {
    let app = app().await;
    for uri in ["/healthz", "/api/books/health", "/api/todos/health", "/api/db/health"] {
        let resp = app.clone().oneshot(request("GET", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}
