//! Bearer-token handling for the role lookup endpoint.
//!
//! Verification is a pluggable seam: handlers depend on [`TokenVerifier`]
//! only, so a real identity-provider-backed verifier can be substituted
//! without touching handler logic.

use axum::http::{HeaderMap, header};
use thiserror::Error;

/// Errors produced while checking a bearer credential.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable bearer token was presented.
    #[error("Unauthorized: No token provided")]
    MissingToken,
    /// The token failed verification.
    #[error("Unauthorized: Invalid token")]
    InvalidToken,
}

/// Verifies a bearer token.
pub trait TokenVerifier: Send + Sync {
    /// Check the presented token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is rejected.
    fn verify(&self, token: &str) -> Result<(), AuthError>;
}

/// Presence-only token "verifier".
///
/// **This is NOT production authentication.** It accepts every non-empty
/// token without checking authenticity, and the uid query parameter is not
/// bound to any token subject. A real deployment must install a verifier
/// that validates the token against the identity provider and binds the
/// requested uid to the verified subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnverifiedTokens;

impl TokenVerifier for UnverifiedTokens {
    fn verify(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Extract the bearer token from the `Authorization` header.
///
/// # Errors
///
/// Returns [`AuthError::MissingToken`] if the header is absent, not valid
/// text, not a `Bearer` scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
