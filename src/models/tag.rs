//! Tag model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 30, message = "Tag name must be 1-30 characters"))]
    pub name: String,
}
