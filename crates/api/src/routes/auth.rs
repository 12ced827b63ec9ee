//! Account creation and login handlers.

use axum::body::Bytes;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::AuthService;
use crate::services::token;
use crate::state::AppState;

use super::{parse_json, required};

/// Sign-up request body.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign-in response: display name plus a fresh bearer token.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub name: String,
    pub token: String,
}

/// `POST /sign-up` - create an account.
#[instrument(skip_all)]
pub async fn sign_up(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let request: SignUpRequest = parse_json(&body)?;

    let name = required(request.name, "name")?;
    let email = required(request.email, "email")?;
    let password = required(request.password, "password")?;

    let user = AuthService::new(state.pool())
        .register_with_password(&name, &email, &password)
        .await?;

    tracing::info!(user_id = %user.id, "account created");

    Ok(StatusCode::CREATED)
}

/// `POST /sign-in` - login and mint a bearer token.
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SignInResponse>> {
    let request: SignInRequest = parse_json(&body)?;

    let email = required(request.email, "email")?;
    let password = required(request.password, "password")?;

    let user = AuthService::new(state.pool())
        .login_with_password(&email, &password)
        .await?;

    let token = token::issue(user.id, state.jwt_secret())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(SignInResponse {
        name: user.name,
        token,
    }))
}
