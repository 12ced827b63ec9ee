//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed with the server secret and carry the account id
//! as the `sub` claim. Verification is always strict: signature and expiry
//! are checked together, and no decode-only entry point exists outside
//! tests. Expiry is the only lifecycle bound (no refresh, no revocation).

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tangerine_core::UserId;

/// Token validity window: 7 days.
pub const TOKEN_TTL_SECONDS: i64 = 604_800;

/// Errors from token issuance or verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token expiry is in the past.
    #[error("token expired")]
    Expired,

    /// Signature does not match the server secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token is structurally invalid (wrong segment count, bad base64, ...).
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The `sub` claim is not a valid account id.
    #[error("invalid subject claim")]
    InvalidSubject,

    /// Encoding a new token failed.
    #[error("token encoding error: {0}")]
    Encoding(String),
}

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id).
    pub sub: String,
    /// Issued at (Unix timestamp).
    pub iat: usize,
    /// Expiration time (Unix timestamp).
    pub exp: usize,
}

impl Claims {
    /// Create claims for a freshly authenticated account.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_user(user_id: UserId) -> Self {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(TOKEN_TTL_SECONDS);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    /// The account id named by the `sub` claim.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidSubject` if `sub` is not an integer id.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|_| TokenError::InvalidSubject)
    }
}

/// Mint a signed token for an account.
///
/// # Errors
///
/// Returns `TokenError::Encoding` if signing fails.
pub fn issue(user_id: UserId, secret: &str) -> Result<String, TokenError> {
    let claims = Claims::for_user(user_id);
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &encoding_key).map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify a token's signature and expiry and extract its claims.
///
/// # Errors
///
/// - `TokenError::Expired` if the token is past its expiry
/// - `TokenError::InvalidSignature` if the signature check fails
/// - `TokenError::Malformed` for anything structurally wrong
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_nbf = false;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

    Ok(token_data.claims)
}
