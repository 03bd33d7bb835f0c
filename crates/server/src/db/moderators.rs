//! Moderator repository.

use apparels_core::Uid;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};

use super::{MODERATORS_COLLECTION, RepositoryError, is_duplicate_key};
use crate::models::{ModeratorDocument, ModeratorUpdate, NewModerator};

/// Store operations over the moderator collection.
#[async_trait]
pub trait ModeratorStore: Send + Sync {
    /// Insert a new moderator and return the stored document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a document with the same uid
    /// already exists, `RepositoryError::Database` on any other failure.
    async fn insert(&self, moderator: NewModerator) -> Result<ModeratorDocument, RepositoryError>;

    /// Find the moderator owning the given uid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_by_uid(&self, uid: &Uid) -> Result<Option<ModeratorDocument>, RepositoryError>;

    /// List moderators, optionally restricted to one uid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self, uid: Option<&Uid>) -> Result<Vec<ModeratorDocument>, RepositoryError>;

    /// Replace the mutable fields of the moderator with the given id.
    ///
    /// Returns `false` if no document matched the id (never upserts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    async fn update(&self, id: ObjectId, update: ModeratorUpdate)
    -> Result<bool, RepositoryError>;

    /// Delete the moderator with the given id.
    ///
    /// Returns `false` if no document was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError>;
}

/// MongoDB-backed [`ModeratorStore`].
#[derive(Debug, Clone)]
pub struct MongoModeratorStore {
    collection: Collection<ModeratorDocument>,
}

impl MongoModeratorStore {
    /// Create a moderator store over the `moderators` collection.
    #[must_use]
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(MODERATORS_COLLECTION),
        }
    }
}

#[async_trait]
impl ModeratorStore for MongoModeratorStore {
    async fn insert(&self, moderator: NewModerator) -> Result<ModeratorDocument, RepositoryError> {
        let document = moderator.into_document();
        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(document),
            // The unique index on uid closes the check-then-insert race.
            Err(e) if is_duplicate_key(&e) => Err(RepositoryError::Conflict(format!(
                "moderator with uid {} already exists",
                document.uid
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_uid(&self, uid: &Uid) -> Result<Option<ModeratorDocument>, RepositoryError> {
        Ok(self
            .collection
            .find_one(doc! { "uid": uid.as_str() })
            .await?)
    }

    async fn list(&self, uid: Option<&Uid>) -> Result<Vec<ModeratorDocument>, RepositoryError> {
        let filter = uid.map_or_else(Document::new, |uid| doc! { "uid": uid.as_str() });
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(
        &self,
        id: ObjectId,
        update: ModeratorUpdate,
    ) -> Result<bool, RepositoryError> {
        let set = doc! {
            "uid": update.uid.as_str(),
            "displayName": &update.display_name,
            "email": &update.email,
            "role": update.role.as_str(),
            // full replacement: an absent image clears the stored value
            "image": update.image.as_deref().map_or(Bson::Null, Bson::from),
            "updatedAt": update.updated_at,
        };
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
