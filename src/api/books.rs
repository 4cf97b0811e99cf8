//! Book (catalog) endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook},
    services::books::BookLookup,
};

/// List every book (single-tenant deployments only)
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = [Book]),
        (status = 400, description = "Deployment requires a userId")
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_all(None).await?;
    Ok(Json(books))
}

/// List the books owned by a user
#[utoipa::path(
    get,
    path = "/books/{user_id}",
    tag = "books",
    params(
        ("user_id" = i32, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "Books owned by the user", body = [Book])
    )
)]
pub async fn list_user_books(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_all(Some(user_id)).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    state
        .services
        .books
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
}

/// Get a book by its exact title
#[utoipa::path(
    get,
    path = "/book/title/{title}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Exact title")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_by_title(
    State(state): State<crate::AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Book>> {
    state
        .services
        .books
        .get_by_title(&title)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book titled '{}' not found", title)))
}

/// List books by author
#[utoipa::path(
    get,
    path = "/books/author/{author}",
    tag = "books",
    params(
        ("author" = String, Path, description = "Exact author name")
    ),
    responses(
        (status = 200, description = "Books by the author", body = [Book])
    )
)]
pub async fn list_books_by_author(
    State(state): State<crate::AppState>,
    Path(author): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_by_author(&author).await?;
    Ok(Json(books))
}

/// Look up books by any allow-listed field (`id`, `title`, `author`, `userId`)
#[utoipa::path(
    get,
    path = "/books/by/{field}/{value}",
    tag = "books",
    params(
        ("field" = String, Path, description = "One of id, title, author, userId"),
        ("value" = String, Path, description = "Value to match exactly")
    ),
    responses(
        (status = 200, description = "A book for id/title, an array for author/userId"),
        (status = 400, description = "Unsupported field or malformed value"),
        (status = 404, description = "No book for a unique field")
    )
)]
pub async fn find_books(
    State(state): State<crate::AppState>,
    Path((field, value)): Path<(String, String)>,
) -> AppResult<Json<BookLookup>> {
    match state.services.books.find_by(&field, &value).await? {
        BookLookup::One(None) => Err(AppError::NotFound(format!(
            "No book with {} '{}'",
            field, value
        ))),
        found => Ok(Json(found)),
    }
}

/// Add a book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or unknown owner")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    book: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(book) = book?;
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
