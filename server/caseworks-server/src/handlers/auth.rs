use crate::error::{ApiContext, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;
use auth_identity::{LoginRequest, LoginResponse, PublicUser, RegisterRequest};
use axum::{extract::State, http::StatusCode, Json};

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = state
        .identity
        .register(request)
        .await
        .api_context("Error registering user")?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .identity
        .login(request)
        .await
        .api_context("An error occurred during login")?;

    Ok(Json(response))
}
