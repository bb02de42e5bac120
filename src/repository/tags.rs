//! Tags repository


use super::{database::Database, name_taken, unique_conflict};
use crate::{
    error::{AppError, AppResult},
    models::tag::{CreateTag, Tag},
};

const DUPLICATE_NAME: &str = "A tag with this name already exists";

#[derive(Clone)]
pub struct TagsRepository {
    db: Database,
}

impl TagsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name")
            .fetch_all(&self.db.reader)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db.reader)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", id)))
    }

    pub async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        let mut tx = self.db.writer.begin().await?;

        if name_taken(&mut tx, "tags", &data.name, None).await? {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let tag = sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES (?) RETURNING *")
            .bind(&data.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| unique_conflict(e, DUPLICATE_NAME))?;

        tx.commit().await?;
        Ok(tag)
    }
}
