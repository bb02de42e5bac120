//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor, UpdateAuthor},
    AppState,
};

use super::{DataResponse, JsonBody, ListResponse, MessageResponse};

/// List all authors ordered by name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = super::AuthorList)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<ListResponse<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(ListResponse::new(authors)))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = super::AuthorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<Author>>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(DataResponse::ok(author)))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = super::AuthorResponse),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse),
        (status = 409, description = "Author name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateAuthor>,
) -> AppResult<(StatusCode, Json<DataResponse<Author>>)> {
    let author = state.services.authors.create(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok(author).with_message("Author created")),
    ))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = super::AuthorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Author name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(data): JsonBody<UpdateAuthor>,
) -> AppResult<Json<DataResponse<Author>>> {
    let author = state.services.authors.update(id, data).await?;
    Ok(Json(DataResponse::ok(author).with_message("Author updated")))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Author still has books", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.authors.delete(id).await?;
    Ok(Json(MessageResponse::new("Author deleted")))
}
