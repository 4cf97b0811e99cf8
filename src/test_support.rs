//! In-memory store used by unit tests.
//!
//! Mirrors the constraints of `schema/bookshelf.sql`: unique usernames and
//! books that must reference an existing user.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookField, BookFilter, CreateBook, NewUser, User},
    repository::{BookStore, UserStore},
};

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    books: Mutex<Vec<Book>>,
}

impl InMemoryStore {
    pub fn users_named(&self, username: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.username == username)
            .count()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let stored = User {
            id: users.len() as i32 + 1,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
        };
        users.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl BookStore for InMemoryStore {
    async fn find_by(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let books = self.books.lock().unwrap();
        let matches = books.iter().filter(|b| match filter {
            BookFilter::Id(id) => b.id == *id,
            BookFilter::Title(title) => &b.title == title,
            BookFilter::Author(author) => &b.author == author,
            BookFilter::UserId(user_id) => b.user_id == *user_id,
        });

        if filter.field() == BookField::Title {
            Ok(matches.take(1).cloned().collect())
        } else {
            Ok(matches.cloned().collect())
        }
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn insert(&self, book: &CreateBook) -> AppResult<i32> {
        let owner_exists = self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id == book.user_id);
        if !owner_exists {
            return Err(AppError::Validation(format!(
                "User {} does not exist",
                book.user_id
            )));
        }

        let mut books = self.books.lock().unwrap();
        let id = books.len() as i32 + 1;
        books.push(Book {
            id,
            user_id: book.user_id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            image_url: book.image_url.clone(),
            notes: book.notes.clone(),
            year_written: book.year_written.clone(),
            read: book.read,
        });
        Ok(id)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
