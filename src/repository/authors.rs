//! Authors repository

use chrono::Utc;
use sqlx::SqliteConnection;

use super::{database::Database, name_taken, unique_conflict};
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

const DUPLICATE_NAME: &str = "An author with this name already exists";

#[derive(Clone)]
pub struct AuthorsRepository {
    db: Database,
}

impl AuthorsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all authors ordered by name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY name")
            .fetch_all(&self.db.reader)
            .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Create an author; fails with `Conflict` when the name is taken
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let mut tx = self.db.writer.begin().await?;

        if name_taken(&mut tx, "authors", &data.name, None).await? {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, biography, birth_date, country, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.biography)
        .bind(data.birth_date)
        .bind(&data.country)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_conflict(e, DUPLICATE_NAME))?;

        tx.commit().await?;
        Ok(author)
    }

    /// Merge the present fields of `data` into the stored author
    pub async fn update(&self, id: i64, data: &UpdateAuthor) -> AppResult<Author> {
        let mut tx = self.db.writer.begin().await?;

        let mut author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;

        if let Some(ref name) = data.name {
            if name_taken(&mut tx, "authors", name, Some(id)).await? {
                return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
            }
        }

        data.apply_to(&mut author);

        let updated = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = ?, biography = ?, birth_date = ?, country = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.birth_date)
        .bind(&author.country)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_conflict(e, DUPLICATE_NAME))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete an author that no book references
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.db.writer.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        let linked = count_linked_books(&mut tx, id).await?;
        if linked > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete author {}: referenced by {} book(s)",
                id, linked
            )));
        }

        sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Number of book links pointing at this author
    pub async fn linked_book_count(&self, id: i64) -> AppResult<i64> {
        let mut conn = self.db.reader.acquire().await?;
        Ok(count_linked_books(&mut conn, id).await?)
    }
}

async fn count_linked_books(conn: &mut SqliteConnection, author_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM book_authors WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(conn)
        .await
}
