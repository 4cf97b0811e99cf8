//! Account registration and password verification

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, AuthFailure},
    models::{NewUser, RegisterUser, User},
    repository::UserStore,
};

/// Verified against when the username is unknown, so both rejection paths
/// pay for one hash verification.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("bookshelf-timing-equalizer").ok());

#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create an account with a freshly hashed password
    pub async fn register(&self, payload: RegisterUser) -> AppResult<User> {
        payload.validate()?;

        // The unique constraint is authoritative; this only avoids a wasted hash.
        if self.users.get_by_username(&payload.username).await?.is_some() {
            tracing::info!(username = %payload.username, "Registration rejected: username taken");
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let RegisterUser {
            first_name,
            last_name,
            username,
            password,
        } = payload;

        let password_hash = hash_password(&password)?;
        drop(password);

        let user = self
            .users
            .create(&NewUser {
                first_name,
                last_name,
                username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair and return the matching user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.users.get_by_username(username).await? else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(dummy, password);
            }
            return Err(AppError::Authentication(AuthFailure::UserNotFound));
        };

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication(AuthFailure::PasswordMismatch));
        }

        tracing::debug!(user_id = user.id, "User authenticated");
        Ok(user)
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::HashFailure(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string
fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::HashFailure(format!("Stored hash is unreadable: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
