//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookStats, CreateBook, UpdateBook},
};

/// Escape LIKE metacharacters so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// SELECT for a filtered, sorted book list
pub(crate) fn list_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT * FROM books WHERE 1=1");

    if let Some(term) = query.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR author ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(genre) = query.genre_filter() {
        builder.push(" AND genre = ").push_bind(genre.to_string());
    }

    let sort = query.sort.unwrap_or_default();
    let order = query.order.unwrap_or_default();
    builder
        .push(" ORDER BY ")
        .push(sort.column())
        .push(" ")
        .push(order.keyword())
        .push(" NULLS LAST, id ASC");

    builder
}

/// UPDATE assigning only the fields present in the patch; `None` if there are none
pub(crate) fn update_query(id: i32, patch: &UpdateBook) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE books SET ");
    {
        let mut sets = builder.separated(", ");

        macro_rules! set_field {
            ($field:expr, $name:literal) => {
                if let Some(ref value) = $field {
                    sets.push(concat!($name, " = "))
                        .push_bind_unseparated(value.clone());
                }
            };
        }

        set_field!(patch.title, "title");
        set_field!(patch.author, "author");
        set_field!(patch.genre, "genre");
        set_field!(patch.year, "year");
        set_field!(patch.isbn, "isbn");
        set_field!(patch.description, "description");
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING *");

    Some(builder)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = list_query(query)
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, year, isbn, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.genre)
        .bind(data.year)
        .bind(&data.isbn)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: i32, patch: &UpdateBook) -> AppResult<Book> {
        let mut builder = update_query(id, patch).ok_or(AppError::EmptyUpdate)?;

        builder
            .build_query_as::<Book>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    async fn stats(&self) -> AppResult<BookStats> {
        let stats = sqlx::query_as::<_, BookStats>(
            r#"
            SELECT COUNT(*) AS total_books,
                   COUNT(DISTINCT NULLIF(genre, '')) AS total_genres,
                   MAX(year) AS latest_year
            FROM books
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn genres(&self) -> AppResult<Vec<String>> {
        let genres = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT genre FROM books WHERE genre IS NOT NULL AND genre <> '' ORDER BY genre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
