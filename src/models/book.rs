//! Book model, its composed read view and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, genre::Genre, tag::Tag};

/// Book row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    /// Unique when present
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    pub page_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Book with its linked authors, genres and tags resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub tags: Vec<Tag>,
}

/// The three many-to-many relations of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRelation {
    Authors,
    Genres,
    Tags,
}

impl BookRelation {
    pub const ALL: [BookRelation; 3] = [BookRelation::Authors, BookRelation::Genres, BookRelation::Tags];

    /// Junction table name
    pub fn table(self) -> &'static str {
        match self {
            BookRelation::Authors => "book_authors",
            BookRelation::Genres => "book_genres",
            BookRelation::Tags => "book_tags",
        }
    }

    /// Junction column referencing the target entity
    pub fn target_column(self) -> &'static str {
        match self {
            BookRelation::Authors => "author_id",
            BookRelation::Genres => "genre_id",
            BookRelation::Tags => "tag_id",
        }
    }

    /// Entity name used in messages
    pub fn entity(self) -> &'static str {
        match self {
            BookRelation::Authors => "Author",
            BookRelation::Genres => "Genre",
            BookRelation::Tags => "Tag",
        }
    }
}

/// Create book request.
///
/// Keys other than the ones below are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    pub page_count: Option<i32>,
    pub author_ids: Option<Vec<i64>>,
    pub genre_ids: Option<Vec<i64>>,
    pub tag_ids: Option<Vec<i64>>,
}

impl CreateBook {
    /// Relationship id lists supplied with the payload
    pub fn links(&self) -> [(BookRelation, Option<&[i64]>); 3] {
        links(&self.author_ids, &self.genre_ids, &self.tag_ids)
    }
}

/// Update book request.
///
/// A relationship id list that is present replaces every link of that kind,
/// an absent one leaves the links untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    #[schema(value_type = Option<String>)]
    pub isbn: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub publication_year: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub page_count: Option<Option<i32>>,
    pub author_ids: Option<Vec<i64>>,
    pub genre_ids: Option<Vec<i64>>,
    pub tag_ids: Option<Vec<i64>>,
}

impl UpdateBook {
    pub fn links(&self) -> [(BookRelation, Option<&[i64]>); 3] {
        links(&self.author_ids, &self.genre_ids, &self.tag_ids)
    }

    /// The ISBN this update would store, if the payload touches it
    pub fn new_isbn(&self) -> Option<Option<String>> {
        self.isbn.as_ref().map(|isbn| normalize_isbn(isbn.as_deref()))
    }

    /// Overwrite every book field present in the payload
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(isbn) = self.new_isbn() {
            book.isbn = isbn;
        }
        if let Some(publication_year) = self.publication_year {
            book.publication_year = publication_year;
        }
        if let Some(ref description) = self.description {
            book.description = description.clone();
        }
        if let Some(page_count) = self.page_count {
            book.page_count = page_count;
        }
    }
}

fn links<'a>(
    author_ids: &'a Option<Vec<i64>>,
    genre_ids: &'a Option<Vec<i64>>,
    tag_ids: &'a Option<Vec<i64>>,
) -> [(BookRelation, Option<&'a [i64]>); 3] {
    [
        (BookRelation::Authors, author_ids.as_deref()),
        (BookRelation::Genres, genre_ids.as_deref()),
        (BookRelation::Tags, tag_ids.as_deref()),
    ]
}

/// Trim an ISBN; blank values mean "no ISBN"
pub fn normalize_isbn(isbn: Option<&str>) -> Option<String> {
    isbn.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Drop repeated ids, keeping the first occurrence of each
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
