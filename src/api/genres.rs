//! Genre endpoints (read-only reference data)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::genre::Genre, AppState};

use super::{DataResponse, ListResponse};

/// List all genres ordered by name
#[utoipa::path(
    get,
    path = "/genres",
    tag = "reference",
    responses(
        (status = 200, description = "List of genres", body = super::GenreList)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<ListResponse<Genre>>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(ListResponse::new(genres)))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "reference",
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = super::GenreResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<Genre>>> {
    let genre = state.services.catalog.get_genre(id).await?;
    Ok(Json(DataResponse::ok(genre)))
}
