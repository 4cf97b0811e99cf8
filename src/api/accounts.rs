//! Account endpoints: sign-up and login

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{LoginRequest, RegisterUser, User},
};

/// Create an account
#[utoipa::path(
    post,
    path = "/createAccount",
    tag = "accounts",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Missing or blank fields"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_account(
    State(state): State<crate::AppState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let created = state.services.credentials.register(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Verify credentials and return the user
#[utoipa::path(
    post,
    path = "/login",
    tag = "accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = User),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(request) = request?;
    let user = state
        .services
        .credentials
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(user))
}
