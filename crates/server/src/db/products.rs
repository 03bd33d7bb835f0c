//! Product repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{doc, oid::ObjectId};

use super::{PRODUCTS_COLLECTION, RepositoryError};
use crate::models::{NewProduct, ProductDocument, ProductUpdate};

/// Store operations over the product collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product and return the stored document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn insert(&self, product: NewProduct) -> Result<ProductDocument, RepositoryError>;

    /// List all products in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self) -> Result<Vec<ProductDocument>, RepositoryError>;

    /// Replace the mutable fields of the product with the given id.
    ///
    /// Returns `false` if no document matched the id (never upserts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    async fn update(&self, id: ObjectId, update: ProductUpdate) -> Result<bool, RepositoryError>;

    /// Delete the product with the given id.
    ///
    /// Returns `false` if no document was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError>;
}

/// MongoDB-backed [`ProductStore`].
#[derive(Debug, Clone)]
pub struct MongoProductStore {
    collection: Collection<ProductDocument>,
}

impl MongoProductStore {
    /// Create a product store over the `product` collection.
    #[must_use]
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(PRODUCTS_COLLECTION),
        }
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert(&self, product: NewProduct) -> Result<ProductDocument, RepositoryError> {
        let document = product.into_document();
        self.collection.insert_one(&document).await?;
        Ok(document)
    }

    async fn list(&self) -> Result<Vec<ProductDocument>, RepositoryError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: ObjectId, update: ProductUpdate) -> Result<bool, RepositoryError> {
        let set = doc! {
            "name": &update.name,
            "image": &update.image,
            "price": update.price,
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
