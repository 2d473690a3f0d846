//! API tests driving the router in-process

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, AppConfig, AppState};

fn app() -> Router {
    api::create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create(app: &Router, body: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"]
        .as_str()
        .expect("No bookId in response")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    create(&app, book("Dunia", 100, 10, false)).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Dunia", 100, 100, false))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let stored = &body["data"]["book"];
    assert_eq!(stored["id"], id);
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["pageCount"], 100);
    assert_eq!(stored["insertedAt"], stored["updatedAt"]);
}

#[tokio::test]
async fn test_create_book_without_name() {
    let app = app();
    let mut payload = book("Dunia", 100, 10, false);
    payload.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_create_book_read_page_exceeds_page_count() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Dunia", 100, 150, false))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
}

#[tokio::test]
async fn test_create_book_keeps_free_form_fields() {
    let app = app();
    let mut payload = book("Dunia", 100, 10, false);
    payload["year"] = json!("2010");
    payload["author"] = json!(42);
    let id = create(&app, payload).await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["year"], "2010");
    assert_eq!(body["data"]["book"]["author"], 42);
}

#[tokio::test]
async fn test_create_book_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_list_books_in_insertion_order() {
    let app = app();
    let first = create(&app, book("Dunia", 100, 10, false)).await;
    let second = create(&app, book("Laskar Pelangi", 200, 20, false)).await;
    assert_ne!(first, second);

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["books"],
        json!([
            { "id": first, "name": "Dunia", "publisher": "Dicoding Indonesia" },
            { "id": second, "name": "Laskar Pelangi", "publisher": "Dicoding Indonesia" }
        ])
    );
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let app = app();
    let reading = create(&app, book("Kambing Jantan", 100, 10, true)).await;
    let finished = create(&app, book("Dunia Sophie", 100, 100, false)).await;

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(body["data"]["books"][0]["id"], reading.as_str());
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(body["data"]["books"][0]["id"], finished.as_str());
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"][0]["id"], finished.as_str());

    let (_, body) = send(&app, Method::GET, "/books?finished=0", None).await;
    assert_eq!(body["data"]["books"][0]["id"], reading.as_str());

    let (_, body) = send(&app, Method::GET, "/books?name=dUnIa", None).await;
    assert_eq!(body["data"]["books"][0]["id"], finished.as_str());
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    // reading takes precedence over name
    let (_, body) = send(&app, Method::GET, "/books?reading=1&name=dunia", None).await;
    assert_eq!(body["data"]["books"][0]["id"], reading.as_str());
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_books_invalid_flag() {
    let (status, body) = send(&app(), Method::GET, "/books?reading=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], api::INVALID_FILTER);
}

#[tokio::test]
async fn test_list_books_empty_flag_falls_through() {
    let app = app();
    create(&app, book("Kambing Jantan", 100, 10, true)).await;
    let dunia = create(&app, book("Dunia Sophie", 100, 100, false)).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=&name=dunia", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["books"][0]["id"], dunia.as_str());

    let (status, body) = send(&app, Method::GET, "/books?finished=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let (status, body) = send(&app(), Method::GET, "/books/xxxxx", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, book("Dunia", 100, 10, false)).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(book("Dunia Revisi", 120, 120, true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let updated = &body["data"]["book"];
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Dunia Revisi");
    assert_eq!(updated["finished"], true);
    assert_eq!(updated["reading"], true);
    assert_eq!(updated["insertedAt"], before["data"]["book"]["insertedAt"]);
}

#[tokio::test]
async fn test_update_book_failures() {
    let app = app();
    let id = create(&app, book("Dunia", 100, 10, false)).await;

    let (status, body) = send(&app, Method::PUT, "/books/xxxxx", Some(book("Dunia", 100, 10, false))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(book("", 100, 10, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(book("Dunia", 100, 150, false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["readPage"], 10);
}

#[tokio::test]
async fn test_delete_book_twice() {
    let app = app();
    let id = create(&app, book("Dunia", 100, 10, false)).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil dihapus");
    assert!(body.get("data").is_none());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
