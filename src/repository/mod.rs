//! Repository layer for database operations.
//!
//! Every multi-statement write runs in a single transaction; dropping the
//! transaction on an early return rolls it back.

pub mod authors;
pub mod books;
pub mod database;
pub mod genres;
pub mod schema;
pub mod tags;

use sqlx::SqliteConnection;

use crate::error::{AppError, AppResult};
use database::Database;

/// Main repository struct holding the database pools
#[derive(Clone)]
pub struct Repository {
    pub database: Database,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub genres: genres::GenresRepository,
    pub tags: tags::TagsRepository,
}

impl Repository {
    /// Create a new repository over the given pools
    pub fn new(database: Database) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(database.clone()),
            books: books::BooksRepository::new(database.clone()),
            genres: genres::GenresRepository::new(database.clone()),
            tags: tags::TagsRepository::new(database.clone()),
            database,
        }
    }

    /// Create missing tables, then optionally insert reference data
    pub async fn initialize(&self, seed: bool) -> AppResult<()> {
        schema::create_tables(&self.database.writer).await?;
        if seed {
            schema::seed_reference_data(&self.database.writer).await?;
        }
        Ok(())
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.database.reader).await?;
        Ok(())
    }
}

/// Map a storage-level unique violation to `Conflict`; anything else stays a
/// database error.
pub(crate) fn unique_conflict(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(message.to_string()),
        other => AppError::Database(other),
    }
}

/// Whether `table` has a row named `name` other than `exclude_id`
pub(crate) async fn name_taken(
    conn: &mut SqliteConnection,
    table: &'static str,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE name = ? AND id IS NOT ?", table);
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}
