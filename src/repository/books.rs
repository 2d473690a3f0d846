//! In-memory book store

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
};

pub const CREATE_NAME_MISSING: &str = "Gagal menambahkan buku. Mohon isi nama buku";
pub const CREATE_READ_PAGE_EXCEEDED: &str =
    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";
pub const CREATE_NOT_RECORDED: &str = "Buku gagal ditambahkan";
pub const BOOK_NOT_FOUND: &str = "Buku tidak ditemukan";
pub const UPDATE_ID_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
pub const UPDATE_NAME_MISSING: &str = "Gagal memperbarui buku. Mohon isi nama buku";
pub const UPDATE_READ_PAGE_EXCEEDED: &str =
    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";
pub const DELETE_ID_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const ID_LENGTH: usize = 16;

#[derive(Default)]
struct Shelf {
    /// Records in insertion order
    books: Vec<Book>,
    /// Every id handed out so far, including deleted ones. Never pruned, so
    /// it grows with the number of books ever created, not the number stored.
    issued: HashSet<String>,
}

impl Shelf {
    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    fn next_id(&mut self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LENGTH)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Owned collection of book records.
///
/// Cloning yields another handle on the same shelf. Every operation holds the
/// lock for its whole validate-then-mutate sequence.
#[derive(Clone, Default)]
pub struct BookStore {
    shelf: Arc<RwLock<Shelf>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Shelf>> {
        self.shelf
            .read()
            .map_err(|e| AppError::StoreInconsistent(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Shelf>> {
        self.shelf
            .write()
            .map_err(|e| AppError::StoreInconsistent(format!("lock poisoned: {e}")))
    }

    /// Add a book and return its new id
    pub fn create(&self, payload: &BookPayload) -> AppResult<String> {
        let name = payload
            .valid_name()
            .ok_or_else(|| AppError::Validation(CREATE_NAME_MISSING.to_string()))?
            .to_string();

        if payload.read_page_exceeds_page_count() {
            return Err(AppError::Validation(CREATE_READ_PAGE_EXCEEDED.to_string()));
        }

        let mut shelf = self.write()?;
        let id = shelf.next_id();
        shelf
            .books
            .push(Book::from_payload(id.clone(), name, payload, Utc::now()));

        if shelf.position(&id).is_none() {
            return Err(AppError::StoreInconsistent(CREATE_NOT_RECORDED.to_string()));
        }

        Ok(id)
    }

    /// Books matching the filter, projected, in insertion order
    pub fn list(&self, query: &BookQuery) -> AppResult<Vec<BookSummary>> {
        let shelf = self.read()?;
        Ok(shelf
            .books
            .iter()
            .filter(|book| query.matches(book))
            .filter(|book| book.is_listable())
            .map(Book::to_summary)
            .collect())
    }

    pub fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let shelf = self.read()?;
        shelf
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Replace every mutable field of a book
    pub fn update(&self, id: &str, payload: &BookPayload) -> AppResult<Book> {
        let mut shelf = self.write()?;
        let index = shelf
            .position(id)
            .ok_or_else(|| AppError::NotFound(UPDATE_ID_NOT_FOUND.to_string()))?;

        let name = payload
            .valid_name()
            .ok_or_else(|| AppError::Validation(UPDATE_NAME_MISSING.to_string()))?
            .to_string();

        if payload.read_page_exceeds_page_count() {
            return Err(AppError::Validation(UPDATE_READ_PAGE_EXCEEDED.to_string()));
        }

        let book = &mut shelf.books[index];
        book.apply(name, payload, Utc::now());
        Ok(book.clone())
    }

    pub fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let mut shelf = self.write()?;
        let index = shelf
            .position(id)
            .ok_or_else(|| AppError::NotFound(DELETE_ID_NOT_FOUND.to_string()))?;
        shelf.books.remove(index);
        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> AppResult<usize> {
        Ok(self.read()?.books.len())
    }
}
