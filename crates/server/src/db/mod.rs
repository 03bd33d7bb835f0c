//! MongoDB access for the two collections.
//!
//! # Database: `apparelsDB`
//!
//! ## Collections
//!
//! - `product` - Product catalog documents
//! - `moderators` - Moderator accounts, unique index on `uid`
//!
//! The store is reached through the [`ProductStore`] and [`ModeratorStore`]
//! traits so handlers never depend on the driver directly; the in-memory
//! implementations used by the integration tests plug into the same seam.

pub mod moderators;
pub mod products;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::models::ModeratorDocument;

pub use moderators::{ModeratorStore, MongoModeratorStore};
pub use products::{MongoProductStore, ProductStore};

/// Name of the product collection.
pub const PRODUCTS_COLLECTION: &str = "product";
/// Name of the moderator collection.
pub const MODERATORS_COLLECTION: &str = "moderators";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from the driver.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Uniqueness violation (duplicate moderator uid).
    #[error("{0}")]
    Conflict(String),
}

/// Open a client against the configured deployment and select the database.
///
/// Connect and server-selection timeouts are set explicitly so a down store
/// bounds every request to one timed-out round trip instead of blocking
/// indefinitely.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the connection string is invalid.
pub async fn connect(config: &ServerConfig) -> Result<Database, RepositoryError> {
    let mut options = ClientOptions::parse(config.database_url.expose_secret()).await?;
    options.app_name = Some("apparels-server".to_string());
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(options)?;
    Ok(client.database(&config.database_name))
}

/// Issue a no-op `ping` command to confirm the connection is usable.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the deployment is unreachable.
pub async fn ping(db: &Database) -> Result<(), RepositoryError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Create the unique index on `moderators.uid`.
///
/// The handler-level existence check before insert is racy under concurrent
/// creation; the index makes the at-most-one-document-per-uid invariant hold
/// regardless, with violations surfacing as [`RepositoryError::Conflict`].
///
/// # Errors
///
/// Returns `RepositoryError::Database` if index creation fails.
pub async fn ensure_indexes(db: &Database) -> Result<(), RepositoryError> {
    let index = IndexModel::builder()
        .keys(doc! { "uid": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<ModeratorDocument>(MODERATORS_COLLECTION)
        .create_index(index)
        .await?;
    Ok(())
}

/// Whether a driver error is a duplicate-key write error (code 11000).
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == 11000,
        _ => false,
    }
}
