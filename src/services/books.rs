//! Book collection service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book, returning the assigned id
    pub fn create(&self, payload: &BookPayload) -> AppResult<String> {
        let id = self
            .repository
            .books
            .create(payload)
            .inspect_err(|e| log_failure("create", None, e))?;
        tracing::info!(book_id = %id, "Book created");
        Ok(id)
    }

    pub fn list(&self, query: &BookQuery) -> AppResult<Vec<BookSummary>> {
        let books = self.repository.books.list(query)?;
        tracing::debug!(?query, count = books.len(), "Books listed");
        Ok(books)
    }

    /// Number of books currently on the shelf
    pub fn count(&self) -> AppResult<usize> {
        self.repository.books.count()
    }

    pub fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id)
    }

    pub fn update(&self, id: &str, payload: &BookPayload) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .update(id, payload)
            .inspect_err(|e| log_failure("update", Some(id), e))?;
        tracing::info!(book_id = %id, finished = book.finished, "Book updated");
        Ok(book)
    }

    pub fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .delete_by_id(id)
            .inspect_err(|e| log_failure("delete", Some(id), e))?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

fn log_failure(operation: &str, id: Option<&str>, error: &AppError) {
    match error {
        AppError::StoreInconsistent(msg) => {
            tracing::error!(operation, book_id = ?id, "Book store inconsistent: {}", msg)
        }
        other => tracing::debug!(operation, book_id = ?id, "Book {} rejected: {}", operation, other),
    }
}
