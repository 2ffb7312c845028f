// ABOUTME: Health check route for liveness probes
// ABOUTME: Reports service identity, version, and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::constants::service_names;
use crate::errors::AppError;
use crate::server::ServerResources;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status (`healthy` or `degraded`)
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Whether the database answered a probe query
    pub database: bool,
}

/// Health route handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle GET /health
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let database = sqlx::query("SELECT 1")
            .fetch_one(resources.database.pool())
            .await
            .is_ok();

        let response = HealthResponse {
            status: if database { "healthy" } else { "degraded" }.to_owned(),
            service: service_names::LADLE.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            database,
        };

        let status = if database {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        Ok((status, Json(response)).into_response())
    }
}
