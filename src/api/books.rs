//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, Outcome},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
};

use super::{ApiResponse, JsonBody, QueryParams};

pub const CREATED: &str = "Buku berhasil ditambahkan";
pub const UPDATED: &str = "Buku berhasil diperbarui";
pub const DELETED: &str = "Buku berhasil dihapus";

type Reply<T> = AppResult<(StatusCode, Json<ApiResponse<T>>)>;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BooksData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

fn reply<T>(outcome: Outcome, message: Option<&str>, data: Option<T>) -> Reply<T> {
    Ok((outcome.status_code(), Json(ApiResponse::success(message, data))))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added; envelope data holds the new id", body = BookIdData),
        (status = 400, description = "Name missing or readPage greater than pageCount", body = crate::error::ErrorResponse),
        (status = 500, description = "Book could not be recorded", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Reply<BookIdData> {
    let book_id = state.services.books.create(&payload)?;
    reply(Outcome::Created, Some(CREATED), Some(BookIdData { book_id }))
}

/// List books, optionally filtered by one criterion
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books as id, name and publisher", body = BooksData),
        (status = 400, description = "Unparseable filter value", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<BookQuery>,
) -> Reply<BooksData> {
    let books = state.services.books.list(&query)?;
    reply(Outcome::Ok, None, Some(BooksData { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookData),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Reply<BookData> {
    let book = state.services.books.get_by_id(&id)?;
    reply(Outcome::Ok, None, Some(BookData { book }))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookData),
        (status = 400, description = "Name missing or readPage greater than pageCount", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Reply<BookData> {
    let book = state.services.books.update(&id, &payload)?;
    reply(Outcome::Updated, Some(UPDATED), Some(BookData { book }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Reply<()> {
    state.services.books.delete_by_id(&id)?;
    reply(Outcome::Deleted, Some(DELETED), None)
}
