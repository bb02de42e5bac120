//! Authors service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create an author. The name is trimmed and must be unique.
    pub async fn create(&self, mut data: CreateAuthor) -> AppResult<Author> {
        data.name = data.name.trim().to_string();
        if data.name.is_empty() {
            return Err(AppError::Validation("Author name cannot be empty".to_string()));
        }
        data.validate()?;

        let author = self.repository.authors.create(&data).await?;
        tracing::info!(author_id = author.id, "Author created: {}", author.name);
        Ok(author)
    }

    /// Update an author
    pub async fn update(&self, id: i64, mut data: UpdateAuthor) -> AppResult<Author> {
        if let Some(ref name) = data.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Validation("Author name cannot be empty".to_string()));
            }
            data.name = Some(name.to_string());
        }
        data.validate()?;

        let author = self.repository.authors.update(id, &data).await?;
        tracing::info!(author_id = id, "Author updated");
        Ok(author)
    }

    /// Delete an author (fails while books still reference it)
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }
}
