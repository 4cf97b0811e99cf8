//! Repository layer for database operations
//!
//! [`UserStore`] and [`BookStore`] are the seams the services depend on; the
//! Postgres repositories in this module are their production implementations.

pub mod books;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFilter, CreateBook, NewUser, User},
};

/// Persistence of user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive username lookup. `Ok(None)` when no such user.
    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user and return the stored row.
    ///
    /// A username taken concurrently surfaces as `AppError::Conflict`.
    async fn create(&self, user: &NewUser) -> AppResult<User>;
}

/// Persistence of books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Books matching a single allow-listed condition
    async fn find_by(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    /// Every book, regardless of owner
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Insert a book and return its generated id
    async fn insert(&self, book: &CreateBook) -> AppResult<i32>;

    /// Round-trip to the store
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
