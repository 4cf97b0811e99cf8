//! Books repository for database operations.
//!
//! Every lookup runs one of the fixed statements below; the filter value is
//! always bound as a parameter and no SQL text is ever built from input.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{is_foreign_key_violation, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookField, BookFilter, CreateBook},
};

macro_rules! select_books {
    ($tail:literal) => {
        concat!(
            "SELECT id, user_id, title, author, description, image_url, notes, year_written, read ",
            "FROM books ",
            $tail
        )
    };
}

const SELECT_ALL: &str = select_books!("ORDER BY id");
const SELECT_BY_ID: &str = select_books!("WHERE id = $1");
// Titles are not constrained unique in storage; the oldest match wins.
const SELECT_BY_TITLE: &str = select_books!("WHERE title = $1 ORDER BY id LIMIT 1");
const SELECT_BY_AUTHOR: &str = select_books!("WHERE author = $1 ORDER BY id");
const SELECT_BY_USER_ID: &str = select_books!("WHERE user_id = $1 ORDER BY id");

/// Statement for a lookup on the given field
pub(crate) fn select_statement(field: BookField) -> &'static str {
    match field {
        BookField::Id => SELECT_BY_ID,
        BookField::Title => SELECT_BY_TITLE,
        BookField::Author => SELECT_BY_AUTHOR,
        BookField::UserId => SELECT_BY_USER_ID,
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_by(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let query = sqlx::query_as::<_, Book>(select_statement(filter.field()));

        let query = match filter {
            BookFilter::Id(id) | BookFilter::UserId(id) => query.bind(*id),
            BookFilter::Title(text) | BookFilter::Author(text) => query.bind(text.as_str()),
        };

        let books = query.fetch_all(&self.pool).await?;
        Ok(books)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn insert(&self, book: &CreateBook) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (
                user_id, title, author, description, image_url, notes, year_written, read
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(book.user_id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.image_url)
        .bind(&book.notes)
        .bind(&book.year_written)
        .bind(book.read)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Validation(format!("User {} does not exist", book.user_id))
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
