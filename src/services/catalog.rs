//! Catalog management service: books and the genre/tag reference data

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{normalize_isbn, BookDetails, CreateBook, UpdateBook},
        genre::{CreateGenre, Genre},
        tag::{CreateTag, Tag},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books with their authors, genres and tags
    pub async fn list_books(&self) -> AppResult<Vec<BookDetails>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book and link it to the given authors, genres and tags.
    /// A duplicate ISBN is rejected; a missing ISBN is never checked.
    pub async fn create_book(&self, mut data: CreateBook) -> AppResult<BookDetails> {
        data.title = data.title.trim().to_string();
        if data.title.is_empty() {
            return Err(AppError::Validation("Book title cannot be empty".to_string()));
        }
        data.isbn = normalize_isbn(data.isbn.as_deref());
        data.validate()?;

        let book = self.repository.books.create(&data).await?;
        tracing::info!(
            book_id = book.book.id,
            authors = book.authors.len(),
            genres = book.genres.len(),
            tags = book.tags.len(),
            "Book created: {}",
            book.book.title
        );
        Ok(book)
    }

    /// Update a book; every supplied id list fully replaces that relation
    pub async fn update_book(&self, id: i64, mut data: UpdateBook) -> AppResult<BookDetails> {
        if let Some(ref title) = data.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(AppError::Validation("Book title cannot be empty".to_string()));
            }
            data.title = Some(title.to_string());
        }
        data.isbn = data.new_isbn();
        data.validate()?;

        let book = self.repository.books.update(id, &data).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    /// Delete a book and all of its links
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_genre(&self, id: i64) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, mut data: CreateGenre) -> AppResult<Genre> {
        data.name = data.name.trim().to_string();
        data.validate()?;

        let genre = self.repository.genres.create(&data).await?;
        tracing::info!(genre_id = genre.id, "Genre created: {}", genre.name);
        Ok(genre)
    }

    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        self.repository.tags.list().await
    }

    pub async fn get_tag(&self, id: i64) -> AppResult<Tag> {
        self.repository.tags.get_by_id(id).await
    }

    pub async fn create_tag(&self, mut data: CreateTag) -> AppResult<Tag> {
        data.name = data.name.trim().to_string();
        data.validate()?;

        let tag = self.repository.tags.create(&data).await?;
        tracing::info!(tag_id = tag.id, "Tag created: {}", tag.name);
        Ok(tag)
    }
}
