//! Genres repository


use super::{database::Database, name_taken, unique_conflict};
use crate::{
    error::{AppError, AppResult},
    models::genre::{CreateGenre, Genre},
};

const DUPLICATE_NAME: &str = "A genre with this name already exists";

#[derive(Clone)]
pub struct GenresRepository {
    db: Database,
}

impl GenresRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List all genres ordered by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.db.reader)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        let mut tx = self.db.writer.begin().await?;

        if name_taken(&mut tx, "genres", &data.name, None).await? {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name, description) VALUES (?, ?) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_conflict(e, DUPLICATE_NAME))?;

        tx.commit().await?;
        Ok(genre)
    }
}
