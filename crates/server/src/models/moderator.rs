//! Moderator documents and wire types.

use apparels_core::{Role, Uid};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A moderator document as stored in the `moderators` collection.
///
/// At most one document exists per uid; the collection carries a unique
/// index on `uid` (created at startup).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub uid: Uid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

/// Validated fields for inserting a new moderator.
#[derive(Debug, Clone)]
pub struct NewModerator {
    pub uid: Uid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub image: Option<String>,
}

impl NewModerator {
    /// Materialize the insert into a full document with a fresh id and
    /// creation timestamp.
    #[must_use]
    pub fn into_document(self) -> ModeratorDocument {
        ModeratorDocument {
            id: ObjectId::new(),
            uid: self.uid,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            image: self.image,
            created_at: bson::DateTime::now(),
            updated_at: None,
        }
    }
}

/// Full-replacement update of the mutable moderator fields.
#[derive(Debug, Clone)]
pub struct ModeratorUpdate {
    pub uid: Uid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    /// `None` clears the stored image.
    pub image: Option<String>,
    pub updated_at: bson::DateTime,
}

impl ModeratorUpdate {
    #[must_use]
    pub fn new(
        uid: Uid,
        display_name: String,
        email: String,
        role: Role,
        image: Option<String>,
    ) -> Self {
        Self {
            uid,
            display_name,
            email,
            role,
            image,
            updated_at: bson::DateTime::now(),
        }
    }
}

/// Wire representation of a stored moderator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub uid: Uid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ModeratorDocument> for ModeratorResponse {
    fn from(doc: ModeratorDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            uid: doc.uid,
            display_name: doc.display_name,
            email: doc.email,
            role: doc.role,
            image: doc.image,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.map(bson::DateTime::to_chrono),
        }
    }
}
