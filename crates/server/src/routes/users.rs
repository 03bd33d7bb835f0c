//! Role lookup handler.

use apparels_core::{Role, Uid};
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use crate::auth::bearer_token;
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for the role lookup.
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub uid: Option<String>,
}

/// Role lookup response body.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Role,
}

/// `GET /api/user/role`
///
/// Resolves a uid to the role stored on its moderator document. The bearer
/// token is checked through the state's [`TokenVerifier`]; with the default
/// stub this is a presence-only check (see [`crate::auth::UnverifiedTokens`]).
///
/// [`TokenVerifier`]: crate::auth::TokenVerifier
pub async fn role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RoleQuery>,
) -> Result<Json<RoleResponse>, AppError> {
    let token = bearer_token(&headers).map_err(|e| AppError::Unauthorized(e.to_string()))?;
    state
        .verifier()
        .verify(token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let uid = query
        .uid
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("UID is required".to_string()))?;
    let uid = Uid::parse(uid).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let moderator = state
        .moderators()
        .find_by_uid(&uid)
        .await
        .map_err(AppError::db("fetch user role"))?
        .ok_or_else(|| AppError::NotFound("User not found in database".to_string()))?;

    Ok(Json(RoleResponse {
        role: moderator.role,
    }))
}
