// ABOUTME: Route handlers for catalog reference data - ingredients and tags
// ABOUTME: Read-only, public, unpaginated; ingredients support a name prefix search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Catalog routes.
//!
//! Ingredients and tags are reference data seeded out-of-band; the API only
//! reads them. Both collections are small and served unpaginated.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::server::ServerResources;

/// Query parameters for the ingredient list
#[derive(Debug, Deserialize, Default)]
pub struct IngredientListQuery {
    /// Name prefix to search for
    pub name: Option<String>,
}

/// Catalog routes handler
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients", get(Self::handle_list_ingredients))
            .route("/api/ingredients/:id", get(Self::handle_get_ingredient))
            .route("/api/tags", get(Self::handle_list_tags))
            .route("/api/tags/:id", get(Self::handle_get_tag))
            .with_state(resources)
    }

    /// Handle GET /api/ingredients - list, optionally filtered by name prefix
    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<IngredientListQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = resources
            .database
            .catalog()
            .list_ingredients(query.name.as_deref())
            .await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /api/ingredients/:id
    async fn handle_get_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .catalog()
            .get_ingredient(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;

        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle GET /api/tags - list all tags
    async fn handle_list_tags(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tags = resources.database.catalog().list_tags().await?;
        Ok((StatusCode::OK, Json(tags)).into_response())
    }

    /// Handle GET /api/tags/:id
    async fn handle_get_tag(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let tag = resources
            .database
            .catalog()
            .get_tag(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id}")))?;

        Ok((StatusCode::OK, Json(tag)).into_response())
    }
}
