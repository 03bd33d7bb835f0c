//! Unified error handling for the API.
//!
//! Every error response body is a JSON object with a single `error` text
//! field, matching the wire contract of the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed. The operation context is interpolated into
    /// the client-visible message so some diagnostic reaches the caller.
    #[error("Failed to {context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Bad request from the client (missing or invalid fields).
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate resource (e.g. moderator uid already taken).
    #[error("{0}")]
    Conflict(String),

    /// Missing or unverifiable credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    /// Builds a mapper from a repository error to a [`AppError::Database`]
    /// with the given operation context.
    pub fn db(context: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Database { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Database { context, source } = &self {
            tracing::error!(error = %source, "Failed to {context}");
        }

        let status = match &self {
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
