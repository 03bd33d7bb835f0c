//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;
use crate::db::{ModeratorStore, ProductStore};

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner data is behind one `Arc`. The stores and the
/// token verifier are trait objects so tests can substitute in-memory
/// implementations and a real verifier can replace the stub.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    products: Arc<dyn ProductStore>,
    moderators: Arc<dyn ModeratorStore>,
    verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Assemble the state from its injected collaborators.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        products: Arc<dyn ProductStore>,
        moderators: Arc<dyn ModeratorStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                moderators,
                verifier,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    #[must_use]
    pub fn moderators(&self) -> &dyn ModeratorStore {
        self.inner.moderators.as_ref()
    }

    #[must_use]
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.inner.verifier.as_ref()
    }
}
