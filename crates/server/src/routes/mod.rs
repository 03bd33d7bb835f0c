//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                     - Liveness (plaintext)
//!
//! # Products
//! POST   /api/products         - Create product
//! GET    /api/products         - List all products
//! PUT    /api/products/{id}    - Replace product fields
//! DELETE /api/products/{id}    - Delete product
//!
//! # Moderators
//! POST   /api/moderators       - Create moderator (uid unique)
//! GET    /api/moderators       - List moderators (?uid= equality filter)
//! PUT    /api/moderators/{id}  - Replace moderator fields
//! DELETE /api/moderators/{id}  - Delete moderator
//!
//! # Role lookup
//! GET    /api/user/role        - Resolve ?uid= to {role} (bearer token required)
//! ```

pub mod moderators;
pub mod products;
pub mod users;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Maximum accepted JSON body size (10 MiB); larger bodies are rejected at
/// the transport layer.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .nest("/api/products", products::router())
        .nest("/api/moderators", moderators::router())
        .route("/api/user/role", get(users::role))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness endpoint.
///
/// Confirms the process is accepting connections, independent of store
/// health.
async fn liveness() -> &'static str {
    "Backend Running"
}
