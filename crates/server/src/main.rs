//! Apparels backend server binary.
//!
//! Startup order: configuration, tracing, store connection (with a `ping`
//! that aborts the process on failure), unique-index creation, router,
//! listener with graceful shutdown.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apparels_server::auth::UnverifiedTokens;
use apparels_server::config::ServerConfig;
use apparels_server::db::{self, MongoModeratorStore, MongoProductStore};
use apparels_server::routes;
use apparels_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apparels_server=info,tower_http=debug".into());

    // Use JSON format on Fly.io for structured log parsing, text format locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    // Connect to the store and confirm connectivity before serving traffic.
    // An unreachable store at startup aborts the process rather than leaving
    // a listener up that can only answer 500s.
    let database = db::connect(&config).await.expect("Failed to create store client");
    db::ping(&database).await.expect("Store unreachable at startup");
    tracing::info!(database = %config.database_name, "Store connection confirmed");

    db::ensure_indexes(&database)
        .await
        .expect("Failed to create moderator uid index");

    // Build application state with the MongoDB-backed stores and the
    // presence-only token stub (see auth::UnverifiedTokens).
    let state = AppState::new(
        config.clone(),
        Arc::new(MongoProductStore::new(&database)),
        Arc::new(MongoModeratorStore::new(&database)),
        Arc::new(UnverifiedTokens),
    );

    // Build router
    let app = routes::router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    status = tracing::field::Empty,
                    latency_ms = tracing::field::Empty,
                )
            })
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record("latency_ms", latency.as_millis() as u64);
                    DefaultOnResponse::default().on_response(response, latency, span);
                },
            ),
    );

    // Start server
    let addr = config.socket_addr();
    tracing::info!("apparels backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
