//! Catalog management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookStats, CreateBook, UpdateBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List books with filters, title-ascending unless asked otherwise
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.store.list(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        self.store.get_by_id(id).await
    }

    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        let book = self.store.create(data).await?;
        tracing::info!(book_id = book.id, "Catalog create: added \"{}\"", book.title);
        Ok(book)
    }

    /// Partial update; an empty patch is rejected before storage is touched
    pub async fn update_book(&self, id: i32, patch: &UpdateBook) -> AppResult<Book> {
        if patch.is_empty() {
            return Err(AppError::EmptyUpdate);
        }
        let book = self.store.update(id, patch).await?;
        tracing::info!(book_id = id, "Catalog update: book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(book_id = id, "Catalog delete: book removed");
        Ok(())
    }

    pub async fn stats(&self) -> AppResult<BookStats> {
        self.store.stats().await
    }

    pub async fn genres(&self) -> AppResult<Vec<String>> {
        self.store.genres().await
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
