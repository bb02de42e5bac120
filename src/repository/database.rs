//! SQLite connection pool construction.
//!
//! Reads go through a pool of several connections. Writes go through a
//! separate pool holding a single connection, so at most one write
//! transaction is open at a time and a deferred `BEGIN` never has to
//! upgrade its lock against another writer (SQLite answers that case with
//! an immediate `SQLITE_BUSY` that the busy timeout does not cover).

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Reader and writer pools over the same database
#[derive(Clone)]
pub struct Database {
    pub reader: Pool<Sqlite>,
    pub writer: Pool<Sqlite>,
}

/// Open a file-backed database, creating the file if missing
pub async fn connect(config: &DatabaseConfig) -> AppResult<Database> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    // Opened first so the file and WAL mode exist before readers connect
    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.busy_timeout_secs))
        .connect_with(options.clone())
        .await?;

    let reader = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await?;

    Ok(Database { reader, writer })
}

/// Open a private in-memory database.
///
/// The pool holds exactly one connection that is never recycled, since the
/// database lives and dies with it. Readers and the writer share it.
pub async fn connect_in_memory() -> AppResult<Database> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(Database {
        reader: pool.clone(),
        writer: pool,
    })
}
