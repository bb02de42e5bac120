//! Tag endpoints (read-only reference data)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::tag::Tag, AppState};

use super::{DataResponse, ListResponse};

/// List all tags ordered by name
#[utoipa::path(
    get,
    path = "/tags",
    tag = "reference",
    responses(
        (status = 200, description = "List of tags", body = super::TagList)
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<ListResponse<Tag>>> {
    let tags = state.services.catalog.list_tags().await?;
    Ok(Json(ListResponse::new(tags)))
}

#[utoipa::path(
    get,
    path = "/tags/{id}",
    tag = "reference",
    params(("id" = i64, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag details", body = super::TagResponse),
        (status = 404, description = "Tag not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let tag = state.services.catalog.get_tag(id).await?;
    Ok(Json(DataResponse::ok(tag)))
}
