//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    /// Unique across all authors
    pub name: String,
    pub biography: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "Author name must be 1-100 characters"))]
    pub name: String,
    pub biography: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 50, message = "Country must be at most 50 characters"))]
    pub country: Option<String>,
}

/// Update author request.
///
/// Absent fields keep their stored value. Nullable fields may be cleared with
/// an explicit `null`; `name` cannot be cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100, message = "Author name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub biography: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 50, message = "Country must be at most 50 characters"))]
    #[schema(value_type = Option<String>)]
    pub country: Option<Option<String>>,
}

impl UpdateAuthor {
    /// Overwrite every field present in the payload
    pub fn apply_to(&self, author: &mut Author) {
        if let Some(ref name) = self.name {
            author.name = name.clone();
        }
        if let Some(ref biography) = self.biography {
            author.biography = biography.clone();
        }
        if let Some(birth_date) = self.birth_date {
            author.birth_date = birth_date;
        }
        if let Some(ref country) = self.country {
            author.country = country.clone();
        }
    }
}
