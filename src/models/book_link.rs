//! Book junction models (N:M relationships to authors, genres and tags)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role of an author on a book. Stored as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthorshipType {
    #[default]
    Author,
    CoAuthor,
    Translator,
}

impl AuthorshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorshipType::Author => "author",
            AuthorshipType::CoAuthor => "co_author",
            AuthorshipType::Translator => "translator",
        }
    }
}

impl From<&str> for AuthorshipType {
    fn from(s: &str) -> Self {
        match s {
            "co_author" => AuthorshipType::CoAuthor,
            "translator" => AuthorshipType::Translator,
            _ => AuthorshipType::Author,
        }
    }
}

/// Junction row linking a book to an author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookAuthor {
    pub id: i64,
    pub book_id: i64,
    pub author_id: i64,
    pub authorship_type: String,
}

impl BookAuthor {
    pub fn authorship(&self) -> AuthorshipType {
        AuthorshipType::from(self.authorship_type.as_str())
    }
}

/// Junction row linking a book to a genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookGenre {
    pub id: i64,
    pub book_id: i64,
    pub genre_id: i64,
}

/// Junction row linking a book to a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookTag {
    pub id: i64,
    pub book_id: i64,
    pub tag_id: i64,
}

/// Every junction row of one book
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookLinks {
    pub authors: Vec<BookAuthor>,
    pub genres: Vec<BookGenre>,
    pub tags: Vec<BookTag>,
}

impl BookLinks {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.genres.is_empty() && self.tags.is_empty()
    }
}
