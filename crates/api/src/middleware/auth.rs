//! Authentication middleware and extractors.
//!
//! Every protected route authenticates through [`RequireAuth`]: strip the
//! bearer prefix, verify the token's signature and expiry, then confirm the
//! claimed account still exists. There is no decode-only path. All failure
//! modes (absent header, malformed token, bad signature, expiry, unknown
//! account) collapse into the same 401.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token naming a live account.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = header
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let claims = token::verify(token, state.jwt_secret())
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        // A valid signature is not enough: the account may have been
        // deleted since the token was minted.
        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("unknown account".to_string()))?;

        Ok(Self(user))
    }
}

/// Strip the `Bearer ` scheme prefix from an authorization header value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
