//! Books repository.
//!
//! A book row and its `book_authors` / `book_genres` / `book_tags` rows are
//! always written in one transaction. Reads compose the book with its linked
//! entities inside one transaction so the joins see a single snapshot.

use chrono::Utc;
use sqlx::SqliteConnection;

use super::{database::Database, unique_conflict};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{dedup_ids, normalize_isbn, Book, BookDetails, BookRelation, CreateBook, UpdateBook},
        book_link::{AuthorshipType, BookAuthor, BookGenre, BookLinks, BookTag},
        genre::Genre,
        tag::Tag,
    },
};

const DUPLICATE_ISBN: &str = "A book with this ISBN already exists";

#[derive(Clone)]
pub struct BooksRepository {
    db: Database,
}

impl BooksRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List every book ordered by title, each with its authors, genres and tags
    pub async fn list(&self) -> AppResult<Vec<BookDetails>> {
        let mut tx = self.db.reader.begin().await?;

        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&mut *tx)
            .await?;

        let mut result = Vec::with_capacity(books.len());
        for book in books {
            result.push(compose(&mut tx, book).await?);
        }

        tx.commit().await?;
        Ok(result)
    }

    /// Get one composed book
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookDetails> {
        let mut tx = self.db.reader.begin().await?;
        let book = fetch_book(&mut tx, id).await?;
        let details = compose(&mut tx, book).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Raw junction rows of a book
    pub async fn links(&self, book_id: i64) -> AppResult<BookLinks> {
        let mut conn = self.db.reader.acquire().await?;

        let authors = sqlx::query_as::<_, BookAuthor>("SELECT * FROM book_authors WHERE book_id = ? ORDER BY id")
            .bind(book_id)
            .fetch_all(&mut *conn)
            .await?;
        let genres = sqlx::query_as::<_, BookGenre>("SELECT * FROM book_genres WHERE book_id = ? ORDER BY id")
            .bind(book_id)
            .fetch_all(&mut *conn)
            .await?;
        let tags = sqlx::query_as::<_, BookTag>("SELECT * FROM book_tags WHERE book_id = ? ORDER BY id")
            .bind(book_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(BookLinks { authors, genres, tags })
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Insert a book and its links. Nothing is kept if any step fails.
    pub async fn create(&self, data: &CreateBook) -> AppResult<BookDetails> {
        let isbn = normalize_isbn(data.isbn.as_deref());

        let mut tx = self.db.writer.begin().await?;

        if let Some(ref isbn) = isbn {
            if isbn_taken(&mut tx, isbn, None).await? {
                return Err(AppError::Conflict(DUPLICATE_ISBN.to_string()));
            }
        }

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, isbn, publication_year, description, page_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&isbn)
        .bind(data.publication_year)
        .bind(&data.description)
        .bind(data.page_count)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_conflict(e, DUPLICATE_ISBN))?;

        for (relation, ids) in data.links() {
            if let Some(ids) = ids {
                insert_links(&mut tx, book.id, relation, ids).await?;
            }
        }

        let details = compose(&mut tx, book).await?;
        tx.commit().await?;
        Ok(details)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Merge present book fields and replace every supplied relation
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<BookDetails> {
        let mut tx = self.db.writer.begin().await?;

        let mut book = fetch_book(&mut tx, id).await?;

        if let Some(Some(ref isbn)) = data.new_isbn() {
            if book.isbn.as_ref() != Some(isbn) && isbn_taken(&mut tx, isbn, Some(id)).await? {
                return Err(AppError::Conflict(DUPLICATE_ISBN.to_string()));
            }
        }

        data.apply_to(&mut book);

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?, isbn = ?, publication_year = ?, description = ?, page_count = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.publication_year)
        .bind(&book.description)
        .bind(book.page_count)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_conflict(e, DUPLICATE_ISBN))?;

        for (relation, ids) in data.links() {
            if let Some(ids) = ids {
                replace_links(&mut tx, id, relation, ids).await?;
            }
        }

        let details = compose(&mut tx, book).await?;
        tx.commit().await?;
        Ok(details)
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book together with all of its links
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.db.writer.begin().await?;

        fetch_book(&mut tx, id).await?;

        for relation in BookRelation::ALL {
            delete_links(&mut tx, id, relation).await?;
        }

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

async fn fetch_book(conn: &mut SqliteConnection, id: i64) -> AppResult<Book> {
    sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
}

async fn isbn_taken(conn: &mut SqliteConnection, isbn: &str, exclude_id: Option<i64>) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE isbn = ? AND id IS NOT ?")
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Resolve the linked authors, genres and tags of a book
async fn compose(conn: &mut SqliteConnection, book: Book) -> AppResult<BookDetails> {
    let authors = sqlx::query_as::<_, Author>(
        r#"
        SELECT a.* FROM authors a
        JOIN book_authors ba ON ba.author_id = a.id
        WHERE ba.book_id = ?
        ORDER BY ba.id
        "#,
    )
    .bind(book.id)
    .fetch_all(&mut *conn)
    .await?;

    let genres = sqlx::query_as::<_, Genre>(
        r#"
        SELECT g.* FROM genres g
        JOIN book_genres bg ON bg.genre_id = g.id
        WHERE bg.book_id = ?
        ORDER BY bg.id
        "#,
    )
    .bind(book.id)
    .fetch_all(&mut *conn)
    .await?;

    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.* FROM tags t
        JOIN book_tags bt ON bt.tag_id = t.id
        WHERE bt.book_id = ?
        ORDER BY bt.id
        "#,
    )
    .bind(book.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(BookDetails {
        book,
        authors,
        genres,
        tags,
    })
}

/// Link a book to each id once and return the number of rows written. A
/// missing target surfaces as a validation error through the foreign key.
async fn insert_links(
    conn: &mut SqliteConnection,
    book_id: i64,
    relation: BookRelation,
    ids: &[i64],
) -> AppResult<usize> {
    let sql = match relation {
        BookRelation::Authors => {
            "INSERT INTO book_authors (book_id, author_id, authorship_type) VALUES (?, ?, ?)".to_string()
        }
        _ => format!(
            "INSERT INTO {} (book_id, {}) VALUES (?, ?)",
            relation.table(),
            relation.target_column()
        ),
    };

    let targets = dedup_ids(ids);
    for &target_id in &targets {
        let mut query = sqlx::query(&sql).bind(book_id).bind(target_id);
        if relation == BookRelation::Authors {
            query = query.bind(AuthorshipType::default().as_str());
        }

        query.execute(&mut *conn).await.map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::Validation(format!("{} {} does not exist", relation.entity(), target_id))
            }
            other => AppError::Database(other),
        })?;
    }

    Ok(targets.len())
}

async fn delete_links(conn: &mut SqliteConnection, book_id: i64, relation: BookRelation) -> AppResult<u64> {
    let sql = format!("DELETE FROM {} WHERE book_id = ?", relation.table());
    let result = sqlx::query(&sql).bind(book_id).execute(conn).await?;
    Ok(result.rows_affected())
}

/// Full replace: drop every link of this kind, then insert the new list
async fn replace_links(
    conn: &mut SqliteConnection,
    book_id: i64,
    relation: BookRelation,
    ids: &[i64],
) -> AppResult<()> {
    let removed = delete_links(&mut *conn, book_id, relation).await?;
    let inserted = insert_links(&mut *conn, book_id, relation, ids).await?;

    tracing::debug!(
        book_id,
        table = relation.table(),
        removed,
        inserted,
        "Replaced book links"
    );
    Ok(())
}
