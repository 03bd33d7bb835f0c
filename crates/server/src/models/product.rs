//! Product documents and wire types.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A product document as stored in the `product` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

/// Validated fields for inserting a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub image: String,
    pub price: f64,
}

impl NewProduct {
    /// Materialize the insert into a full document with a fresh id and
    /// creation timestamp.
    #[must_use]
    pub fn into_document(self) -> ProductDocument {
        ProductDocument {
            id: ObjectId::new(),
            name: self.name,
            image: self.image,
            price: self.price,
            created_at: bson::DateTime::now(),
            updated_at: None,
        }
    }
}

/// Full-replacement update of the mutable product fields.
///
/// Applied with `$set`; `updated_at` is stamped by the handler so the echoed
/// response matches what was written.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub image: String,
    pub price: f64,
    pub updated_at: bson::DateTime,
}

impl ProductUpdate {
    #[must_use]
    pub fn new(name: String, image: String, price: f64) -> Self {
        Self {
            name,
            image,
            price,
            updated_at: bson::DateTime::now(),
        }
    }
}

/// Wire representation of a stored product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProductDocument> for ProductResponse {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            image: doc.image,
            price: doc.price,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.map(bson::DateTime::to_chrono),
        }
    }
}
