// ABOUTME: Server assembly - shared resources, router construction, and the serve loop
// ABOUTME: Layers tracing, request ids, CORS, timeout, and body-limit middleware
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Server assembly.
//!
//! [`ServerResources`] bundles the shared state handed to every route
//! handler; [`run`] binds the listener and serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::constants::limits;
use crate::database::Database;
use crate::routes::{CatalogRoutes, HealthRoutes, RecipeRoutes, UserRoutes};

/// Shared state for route handlers
pub struct ServerResources {
    /// Database pool and managers
    pub database: Arc<Database>,
    /// JWT validator
    pub auth: Arc<AuthManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth: AuthManager, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            auth: Arc::new(auth),
            config,
        }
    }
}

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(CatalogRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            limits::REQUEST_TIMEOUT_SECS,
        )))
        // Raise axum's extractor limit to match; the tower-http layer is the cap
        .layer(DefaultBodyLimit::max(limits::MAX_REQUEST_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(limits::MAX_REQUEST_BODY_BYTES))
}

/// Bind the listener and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run(resources: Arc<ServerResources>, port: u16) -> Result<()> {
    let app = router(resources);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
    }
}
