//! Table creation and reference data.
//!
//! Junction tables reference their targets, so they are created last.

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Sqlite};

use crate::error::AppResult;

const CREATE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        biography TEXT,
        birth_date TEXT,
        country TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genres (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        isbn TEXT UNIQUE,
        publication_year INTEGER,
        description TEXT,
        page_count INTEGER,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book_authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER NOT NULL REFERENCES books(id),
        author_id INTEGER NOT NULL REFERENCES authors(id),
        authorship_type TEXT NOT NULL DEFAULT 'author'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book_genres (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER NOT NULL REFERENCES books(id),
        genre_id INTEGER NOT NULL REFERENCES genres(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS book_tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        book_id INTEGER NOT NULL REFERENCES books(id),
        tag_id INTEGER NOT NULL REFERENCES tags(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_book_authors_book ON book_authors(book_id)",
    "CREATE INDEX IF NOT EXISTS idx_book_authors_author ON book_authors(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_book_genres_book ON book_genres(book_id)",
    "CREATE INDEX IF NOT EXISTS idx_book_genres_genre ON book_genres(genre_id)",
    "CREATE INDEX IF NOT EXISTS idx_book_tags_book ON book_tags(book_id)",
    "CREATE INDEX IF NOT EXISTS idx_book_tags_tag ON book_tags(tag_id)",
];

/// Create every table and index that does not exist yet
pub async fn create_tables(pool: &Pool<Sqlite>) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for statement in CREATE_STATEMENTS {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}

const SEED_AUTHORS: &[(&str, &str, (i32, u32, u32))] = &[
    ("Leo Tolstoy", "Russia", (1828, 9, 9)),
    ("Fyodor Dostoevsky", "Russia", (1821, 11, 11)),
    ("Alexander Pushkin", "Russia", (1799, 6, 6)),
];

const SEED_GENRES: &[(&str, &str)] = &[
    ("Novel", "Long-form narrative prose"),
    ("Poetry", "Works written in verse"),
    ("Drama", "Works written for the stage"),
];

const SEED_TAGS: &[&str] = &["classic", "russian literature", "19th century"];

/// Insert the reference authors, genres and tags. Rows whose name already
/// exists are skipped, so this can run on every startup.
pub async fn seed_reference_data(pool: &Pool<Sqlite>) -> AppResult<()> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    for (name, country, (y, m, d)) in SEED_AUTHORS {
        sqlx::query(
            r#"
            INSERT INTO authors (name, country, birth_date, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(*name)
        .bind(*country)
        .bind(NaiveDate::from_ymd_opt(*y, *m, *d))
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for (name, description) in SEED_GENRES {
        sqlx::query("INSERT INTO genres (name, description) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(*name)
            .bind(*description)
            .execute(&mut *tx)
            .await?;
    }

    for name in SEED_TAGS {
        sqlx::query("INSERT INTO tags (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(*name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!("Reference data seeded");
    Ok(())
}
