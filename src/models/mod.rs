//! Data models for Bookshelf

pub mod author;
pub mod book;
pub mod book_link;
pub mod genre;
pub mod tag;

// Re-export commonly used types
pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use book::{Book, BookDetails, BookRelation, CreateBook, UpdateBook};
pub use book_link::{AuthorshipType, BookAuthor, BookGenre, BookLinks, BookTag};
pub use genre::{CreateGenre, Genre};
pub use tag::{CreateTag, Tag};
