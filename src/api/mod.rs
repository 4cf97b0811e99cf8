//! API handlers for Bookshelf REST endpoints

pub mod accounts;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let api = Router::new()
        // Accounts
        .route("/createAccount", post(accounts::create_account))
        .route("/signUp", post(accounts::create_account))
        .route("/login", post(accounts::login))
        .route("/signIn", post(accounts::login))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/:user_id", get(books::list_user_books))
        .route("/books/author/:author", get(books::list_books_by_author))
        .route("/books/by/:field/:value", get(books::find_books))
        .route("/book", post(books::create_book))
        .route("/book/:id", get(books::get_book))
        .route("/book/title/:title", get(books::get_book_by_title));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api)
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
