//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Genre record (reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Create genre request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[validate(length(min = 1, max = 50, message = "Genre name must be 1-50 characters"))]
    pub name: String,
    pub description: Option<String>,
}
