//! Book catalog service

use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::{
    config::Tenancy,
    error::{AppError, AppResult},
    models::{Book, BookFilter, CreateBook},
    repository::BookStore,
};

/// Result of a single-field lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BookLookup {
    /// Lookup on a unique field (`id`, `title`)
    One(Option<Book>),
    /// Lookup on a shared field (`author`, `userId`)
    Many(Vec<Book>),
}

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    tenancy: Tenancy,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, tenancy: Tenancy) -> Self {
        Self { books, tenancy }
    }

    /// Look up books by a caller-named field.
    ///
    /// The field name is checked against the allow-list before any query runs.
    pub async fn find_by(&self, field: &str, value: &str) -> AppResult<BookLookup> {
        let filter = BookFilter::parse(field, value)?;
        self.lookup(&filter).await
    }

    pub async fn lookup(&self, filter: &BookFilter) -> AppResult<BookLookup> {
        tracing::debug!(field = %filter.field(), "Book lookup");
        let books = self.books.find_by(filter).await?;

        if filter.field().is_unique() {
            Ok(BookLookup::One(books.into_iter().next()))
        } else {
            Ok(BookLookup::Many(books))
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.find_one(&BookFilter::Id(id)).await
    }

    pub async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        self.find_one(&BookFilter::Title(title.to_string())).await
    }

    pub async fn list_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        self.books
            .find_by(&BookFilter::Author(author.to_string()))
            .await
    }

    /// List books, scoped to `owner` when given.
    ///
    /// Unscoped listings are only available in single-tenant deployments.
    pub async fn list_all(&self, owner: Option<i32>) -> AppResult<Vec<Book>> {
        match (owner, self.tenancy) {
            (Some(user_id), _) => self.books.find_by(&BookFilter::UserId(user_id)).await,
            (None, Tenancy::Single) => self.books.list().await,
            (None, Tenancy::Multi) => Err(AppError::Validation(
                "A userId is required to list books".to_string(),
            )),
        }
    }

    /// Insert a book and return it as stored
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let id = self.books.insert(&book).await?;
        tracing::info!(book_id = id, user_id = book.user_id, "Book created");

        self.get_by_id(id).await?.ok_or_else(|| {
            AppError::Persistence(format!("Book {} was inserted but cannot be read back", id))
        })
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.books.ping().await
    }

    async fn find_one(&self, filter: &BookFilter) -> AppResult<Option<Book>> {
        Ok(self.books.find_by(filter).await?.into_iter().next())
    }
}
