//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, BookStats, CreateBook, UpdateBook},
};

/// Storage operations on the book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Books matching the filter, in the requested order
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    /// Book by ID, `None` when absent
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, data: &CreateBook) -> AppResult<Book>;

    /// Apply a partial update and return the updated book
    async fn update(&self, id: i32, patch: &UpdateBook) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn stats(&self) -> AppResult<BookStats>;

    /// Distinct non-empty genres, alphabetically
    async fn genres(&self) -> AppResult<Vec<String>>;

    /// Round-trip to the storage engine
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct, one member per table
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool),
        }
    }
}
