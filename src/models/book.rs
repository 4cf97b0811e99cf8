//! Book (catalog entry) model and lookup filters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::user::not_blank;
use crate::error::{AppError, AppResult};

/// A stored book
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    /// Owning user
    pub user_id: i32,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_written: Option<String>,
    pub read: bool,
}

/// Book creation payload (no id)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub user_id: i32,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Author is required"))]
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub year_written: Option<String>,
    #[serde(default)]
    pub read: bool,
}

/// Columns a book lookup may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    Author,
    UserId,
}

impl BookField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::UserId => "userId",
        }
    }

    /// Whether a match on this field yields at most one book
    pub fn is_unique(&self) -> bool {
        matches!(self, BookField::Id | BookField::Title)
    }
}

impl std::fmt::Display for BookField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(BookField::Id),
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "userId" => Ok(BookField::UserId),
            other => Err(AppError::UnsupportedFilterField(other.to_string())),
        }
    }
}

/// A single `field = value` condition with a typed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Id(i32),
    Title(String),
    Author(String),
    UserId(i32),
}

impl BookFilter {
    /// Build a filter from a caller-supplied field name and raw value.
    ///
    /// Fails with [`AppError::UnsupportedFilterField`] for any field outside
    /// the allow-list, and with [`AppError::Validation`] when an id value is
    /// not an integer.
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        let field: BookField = field.parse()?;
        let parse_id = |v: &str| {
            v.trim().parse::<i32>().map_err(|_| {
                AppError::Validation(format!("'{}' expects an integer, got '{}'", field, v))
            })
        };

        Ok(match field {
            BookField::Id => BookFilter::Id(parse_id(value)?),
            BookField::Title => BookFilter::Title(value.to_string()),
            BookField::Author => BookFilter::Author(value.to_string()),
            BookField::UserId => BookFilter::UserId(parse_id(value)?),
        })
    }

    pub fn field(&self) -> BookField {
        match self {
            BookFilter::Id(_) => BookField::Id,
            BookFilter::Title(_) => BookField::Title,
            BookFilter::Author(_) => BookField::Author,
            BookFilter::UserId(_) => BookField::UserId,
        }
    }
}
