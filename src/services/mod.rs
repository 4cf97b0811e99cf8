//! Business logic services

pub mod books;
pub mod credentials;

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    repository::{BookStore, Repository, UserStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub credentials: credentials::CredentialService,
    pub books: books::BookService,
}

impl Services {
    /// Create all services backed by the Postgres repository
    pub fn new(repository: Repository, catalog: &CatalogConfig) -> Self {
        Self::with_stores(
            Arc::new(repository.users),
            Arc::new(repository.books),
            catalog,
        )
    }

    /// Create all services over arbitrary store implementations
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
        catalog: &CatalogConfig,
    ) -> Self {
        Self {
            credentials: credentials::CredentialService::new(users),
            books: books::BookService::new(books, catalog.tenancy),
        }
    }
}
