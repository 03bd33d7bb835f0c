//! Integration test support for the apparels backend.
//!
//! The tests drive the real router in-process via `tower::ServiceExt::oneshot`
//! against in-memory implementations of the store traits, so no MongoDB
//! deployment is required. The in-memory moderator store enforces uid
//! uniqueness the same way the unique index does in production.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::missing_errors_doc)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use apparels_core::Uid;
use apparels_server::auth::UnverifiedTokens;
use apparels_server::config::ServerConfig;
use apparels_server::db::{ModeratorStore, ProductStore, RepositoryError};
use apparels_server::models::{
    ModeratorDocument, ModeratorUpdate, NewModerator, NewProduct, ProductDocument, ProductUpdate,
};
use apparels_server::routes;
use apparels_server::state::AppState;

/// In-memory [`ProductStore`].
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    docs: Mutex<Vec<ProductDocument>>,
}

impl MemoryProductStore {
    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<ProductDocument, RepositoryError> {
        let document = product.into_document();
        self.docs.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn list(&self) -> Result<Vec<ProductDocument>, RepositoryError> {
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn update(&self, id: ObjectId, update: ProductUpdate) -> Result<bool, RepositoryError> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.name = update.name;
                doc.image = update.image;
                doc.price = update.price;
                doc.updated_at = Some(update.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }
}

/// In-memory [`ModeratorStore`] enforcing uid uniqueness on insert.
#[derive(Debug, Default)]
pub struct MemoryModeratorStore {
    docs: Mutex<Vec<ModeratorDocument>>,
}

impl MemoryModeratorStore {
    /// Number of stored documents with the given uid.
    pub fn count_by_uid(&self, uid: &str) -> usize {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.uid.as_str() == uid)
            .count()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ModeratorStore for MemoryModeratorStore {
    async fn insert(&self, moderator: NewModerator) -> Result<ModeratorDocument, RepositoryError> {
        let document = moderator.into_document();
        let mut docs = self.docs.lock().unwrap();
        if docs.iter().any(|d| d.uid == document.uid) {
            return Err(RepositoryError::Conflict(format!(
                "moderator with uid {} already exists",
                document.uid
            )));
        }
        docs.push(document.clone());
        Ok(document)
    }

    async fn find_by_uid(&self, uid: &Uid) -> Result<Option<ModeratorDocument>, RepositoryError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.uid == *uid)
            .cloned())
    }

    async fn list(&self, uid: Option<&Uid>) -> Result<Vec<ModeratorDocument>, RepositoryError> {
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .iter()
            .filter(|d| uid.is_none_or(|uid| d.uid == *uid))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: ObjectId,
        update: ModeratorUpdate,
    ) -> Result<bool, RepositoryError> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.uid = update.uid;
                doc.display_name = update.display_name;
                doc.email = update.email;
                doc.role = update.role;
                doc.image = update.image;
                doc.updated_at = Some(update.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }
}

/// A router wired to fresh in-memory stores, with handles to inspect them.
pub struct TestContext {
    pub app: Router,
    pub products: Arc<MemoryProductStore>,
    pub moderators: Arc<MemoryModeratorStore>,
}

impl TestContext {
    /// Build a test context with empty stores and the stub token verifier.
    #[must_use]
    pub fn new() -> Self {
        let products = Arc::new(MemoryProductStore::default());
        let moderators = Arc::new(MemoryModeratorStore::default());
        let state = AppState::new(
            test_config(),
            products.clone(),
            moderators.clone(),
            Arc::new(UnverifiedTokens),
        );
        Self {
            app: routes::router(state),
            products,
            moderators,
        }
    }

    /// Send a request through the router and decode the JSON response body.
    ///
    /// Returns `Value::Null` for empty or non-JSON bodies.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_bearer(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::put(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request and return the raw body as text (for non-JSON routes).
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration stand-in; the stores are injected so the URL is never dialed.
fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("mongodb://localhost:27017"),
        database_name: "apparelsDB-test".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    }
}
