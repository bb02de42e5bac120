//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookDetails, CreateBook, UpdateBook},
    AppState,
};

use super::{DataResponse, JsonBody, ListResponse, MessageResponse};

/// List all books with their authors, genres and tags
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = super::BookList)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<ListResponse<BookDetails>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(ListResponse::new(books)))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = super::BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<BookDetails>>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(DataResponse::ok(book)))
}

/// Create a new book, optionally linked to authors, genres and tags
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = super::BookResponse),
        (status = 400, description = "Missing title or unknown linked id", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<BookDetails>>)> {
    let book = state.services.catalog.create_book(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(book).with_message("Book created")),
    ))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = super::BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(data): JsonBody<UpdateBook>,
) -> AppResult<Json<DataResponse<BookDetails>>> {
    let book = state.services.catalog.update_book(id, data).await?;
    Ok(Json(DataResponse::ok(book).with_message("Book updated")))
}

/// Delete a book and its links
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(id).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}
