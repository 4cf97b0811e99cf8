//! Data models for Bookshelf

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookField, BookFilter, CreateBook};
pub use user::{LoginRequest, NewUser, RegisterUser, User};
