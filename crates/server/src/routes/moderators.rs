//! Moderator resource handlers.

use apparels_core::{Role, Uid};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{post, put},
};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::RepositoryError;
use crate::error::AppError;
use crate::models::{ModeratorResponse, ModeratorUpdate, NewModerator};
use crate::state::AppState;

const MISSING_FIELDS: &str = "UID, displayName, email, and role are required";
const DUPLICATE_UID: &str = "Moderator with this UID already exists";

/// Build the moderators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create).get(list))
        .route("/{id}", put(update).delete(remove))
}

/// Incoming moderator body for create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorPayload {
    pub uid: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub image: Option<String>,
}

impl ModeratorPayload {
    /// Require uid, displayName, email, role non-empty, with role inside the
    /// enum. The email is intentionally not format-validated.
    fn validate(self) -> Result<NewModerator, AppError> {
        let Self {
            uid,
            display_name,
            email,
            role,
            image,
        } = self;

        let (Some(uid), Some(display_name), Some(email), Some(role)) =
            (uid, display_name, email, role)
        else {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        };
        if display_name.is_empty() || email.is_empty() || role.is_empty() {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        }
        let uid =
            Uid::parse(&uid).map_err(|_| AppError::BadRequest(MISSING_FIELDS.to_string()))?;
        let role = role
            .parse::<Role>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(NewModerator {
            uid,
            display_name,
            email,
            role,
            image,
        })
    }
}

/// Equality filter for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ModeratorListQuery {
    pub uid: Option<String>,
}

/// Echo of the submitted fields returned by a successful update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedModerator {
    #[serde(rename = "_id")]
    id: String,
    uid: Uid,
    display_name: String,
    email: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    updated_at: DateTime<Utc>,
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("Invalid moderator id".to_string()))
}

/// `POST /api/moderators`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ModeratorPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let moderator = body.validate()?;

    // Friendly-path check; the unique index on uid is the real guarantee.
    let existing = state
        .moderators()
        .find_by_uid(&moderator.uid)
        .await
        .map_err(AppError::db("add moderator"))?;
    if existing.is_some() {
        return Err(AppError::Conflict(DUPLICATE_UID.to_string()));
    }

    let stored = state
        .moderators()
        .insert(moderator)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::Conflict(DUPLICATE_UID.to_string()),
            other => AppError::db("add moderator")(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Moderator added successfully",
            "moderator": ModeratorResponse::from(stored),
        })),
    ))
}

/// `GET /api/moderators`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ModeratorListQuery>,
) -> Result<Json<Vec<ModeratorResponse>>, AppError> {
    // A blank ?uid= behaves like an absent filter.
    let uid = match query.uid.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(Uid::parse(s).map_err(|e| AppError::BadRequest(e.to_string()))?),
        None => None,
    };

    let moderators = state
        .moderators()
        .list(uid.as_ref())
        .await
        .map_err(AppError::db("fetch moderators"))?;

    Ok(Json(
        moderators.into_iter().map(ModeratorResponse::from).collect(),
    ))
}

/// `PUT /api/moderators/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ModeratorPayload>,
) -> Result<Json<Value>, AppError> {
    let moderator = body.validate()?;
    let id = parse_id(&id)?;

    let update = ModeratorUpdate::new(
        moderator.uid,
        moderator.display_name,
        moderator.email,
        moderator.role,
        moderator.image,
    );
    let matched = state
        .moderators()
        .update(id, update.clone())
        .await
        .map_err(AppError::db("update moderator"))?;
    if !matched {
        return Err(AppError::NotFound("Moderator not found".to_string()));
    }

    Ok(Json(json!({
        "message": "Moderator updated successfully",
        "moderator": UpdatedModerator {
            id: id.to_hex(),
            uid: update.uid,
            display_name: update.display_name,
            email: update.email,
            role: update.role,
            image: update.image,
            updated_at: update.updated_at.to_chrono(),
        },
    })))
}

/// `DELETE /api/moderators/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;

    let deleted = state
        .moderators()
        .delete(id)
        .await
        .map_err(AppError::db("delete moderator"))?;
    if !deleted {
        return Err(AppError::NotFound("Moderator not found".to_string()));
    }

    Ok(Json(json!({ "message": "Moderator deleted successfully" })))
}
