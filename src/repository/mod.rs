//! Repository layer holding the in-memory collections

pub mod books;

pub use books::BookStore;

/// Main repository struct; clones share the same underlying collections
#[derive(Clone, Default)]
pub struct Repository {
    pub books: BookStore,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            books: BookStore::new(),
        }
    }
}
