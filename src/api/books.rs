//! Book (catalog) endpoints
//!
//! Failure statuses follow the endpoint, not the error: reads of the whole
//! catalog answer 500, mutations answer 400.

use std::fmt::Display;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::{ApiError, AppError, ResultExt},
    models::book::{Book, BookQuery, BookStats, CreateBook, UpdateBook},
    AppState,
};

use super::ApiResponse;

fn bad_request(rejection: impl Display) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        AppError::BadRequest(rejection.to_string()),
    )
}

/// List books with search and genre filter
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Enveloped list of books", body = Vec<Book>),
        (status = 400, description = "Invalid sort parameters"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Book>>, ApiError> {
    let Query(query) = query.map_err(bad_request)?;

    let books = state
        .services
        .catalog
        .list_books(&query)
        .await
        .or_status(StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(ApiResponse::ok(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Enveloped book", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<Book>, ApiError> {
    let Path(id) = id.map_err(bad_request)?;

    let book = state
        .services
        .catalog
        .get_book(id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    Ok(ApiResponse::ok(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Enveloped created book", body = Book),
        (status = 400, description = "Rejected by storage or malformed body")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    data: Result<Json<CreateBook>, JsonRejection>,
) -> Result<ApiResponse<Book>, ApiError> {
    let Json(data) = data.map_err(bad_request)?;

    let book = state
        .services
        .catalog
        .create_book(&data)
        .await
        .or_status(StatusCode::BAD_REQUEST)?;
    Ok(ApiResponse::created(book, "Book created successfully"))
}

/// Partially update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Enveloped updated book", body = Book),
        (status = 400, description = "Empty update, book not found or rejected by storage")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    patch: Result<Json<UpdateBook>, JsonRejection>,
) -> Result<ApiResponse<Book>, ApiError> {
    let Path(id) = id.map_err(bad_request)?;
    let Json(patch) = patch.map_err(bad_request)?;

    let book = state
        .services
        .catalog
        .update_book(id, &patch)
        .await
        .or_status(StatusCode::BAD_REQUEST)?;
    Ok(ApiResponse::ok(book).with_message("Book updated successfully"))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Book not found or storage failure")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id.map_err(bad_request)?;

    state
        .services
        .catalog
        .delete_book(id)
        .await
        .or_status(StatusCode::BAD_REQUEST)?;
    Ok(ApiResponse::message("Book deleted successfully"))
}

/// Catalog statistics
#[utoipa::path(
    get,
    path = "/books/stats/overview",
    tag = "books",
    responses(
        (status = 200, description = "Enveloped statistics", body = BookStats),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<ApiResponse<BookStats>, ApiError> {
    let stats = state
        .services
        .catalog
        .stats()
        .await
        .or_status(StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(ApiResponse::ok(stats))
}

/// Distinct genres in the catalog
#[utoipa::path(
    get,
    path = "/books/genres",
    tag = "books",
    responses(
        (status = 200, description = "Enveloped genre names", body = Vec<String>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> Result<ApiResponse<Vec<String>>, ApiError> {
    let genres = state
        .services
        .catalog
        .genres()
        .await
        .or_status(StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(ApiResponse::ok(genres))
}
