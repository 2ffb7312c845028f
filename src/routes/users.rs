// ABOUTME: Route handlers for user profiles and author subscriptions
// ABOUTME: Subscribe/unsubscribe toggles return the author's profile-with-recipes view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! User routes.
//!
//! Profile reads are public (personalized when a token is supplied);
//! subscription endpoints require authentication. Registration, passwords,
//! and token issuance live in the external identity service.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::User;
use crate::pagination::PageParams;
use crate::routes::recipes::ShortRecipeResponse;
use crate::server::ServerResources;

// ============================================================================
// Response Types
// ============================================================================

/// Public profile representation of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the requesting user follows this user
    pub is_subscribed: bool,
}

impl UserResponse {
    /// Build from a user row and the computed follow flag
    #[must_use]
    pub fn from_user(user: &User, is_subscribed: bool) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_subscribed,
        }
    }
}

/// Profile-with-recipes view returned by subscription endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// User id
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Whether the requesting user follows this author
    pub is_subscribed: bool,
    /// The author's recipes as short views
    pub recipes: Vec<ShortRecipeResponse>,
    /// Total number of recipes by this author
    pub recipes_count: i64,
}

/// Response for listing subscriptions
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSubscriptionsResponse {
    /// Followed authors with their recipes
    pub authors: Vec<SubscriptionResponse>,
    /// Count of authors in this page
    pub total: usize,
}

/// Response for listing user profiles
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// User profiles
    pub users: Vec<UserResponse>,
    /// Count of users in this page
    pub total: usize,
}

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for subscription views
#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Truncate each author's embedded recipe list
    pub recipes_limit: Option<i64>,
}

// ============================================================================
// Routes
// ============================================================================

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", get(Self::handle_list_users))
            .route("/api/users/me", get(Self::handle_me))
            .route("/api/users/subscriptions", get(Self::handle_subscriptions))
            .route("/api/users/:id", get(Self::handle_get_user))
            .route(
                "/api/users/:id/subscribe",
                axum::routing::post(Self::handle_subscribe).delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    /// Build the profile-with-recipes view for one author
    pub(crate) async fn build_subscription(
        resources: &Arc<ServerResources>,
        author: &User,
        viewer: Uuid,
        recipes_limit: Option<i64>,
    ) -> Result<SubscriptionResponse, AppError> {
        let recipes_mgr = resources.database.recipes();
        let recipes = recipes_mgr
            .recipes_by_author(author.id, recipes_limit)
            .await?;
        let recipes_count = recipes_mgr.count_recipes_by_author(author.id).await?;
        let is_subscribed = resources
            .database
            .users()
            .is_following(viewer, author.id)
            .await?;

        Ok(SubscriptionResponse {
            id: author.id.to_string(),
            username: author.username.clone(),
            email: author.email.clone(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            is_subscribed,
            recipes: recipes.iter().map(ShortRecipeResponse::from).collect(),
            recipes_count,
        })
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Handle GET /api/users - list profiles
    async fn handle_list_users(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(page): Query<PageParams>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth.optional_identity(&headers)?;
        let users_mgr = resources.database.users();

        let users = users_mgr.list_users(page.limit(), page.offset()).await?;

        let mut profiles = Vec::with_capacity(users.len());
        for user in &users {
            let is_subscribed = match &viewer {
                Some(auth) => users_mgr.is_following(auth.user_id, user.id).await?,
                None => false,
            };
            profiles.push(UserResponse::from_user(user, is_subscribed));
        }

        let response = ListUsersResponse {
            total: profiles.len(),
            users: profiles,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/me - the requesting user's own profile
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let user = resources
            .database
            .users()
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let response = UserResponse::from_user(&user, false);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id - one profile
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth.optional_identity(&headers)?;
        let user_id = parse_user_id(&id)?;

        let users_mgr = resources.database.users();
        let user = users_mgr
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        let is_subscribed = match &viewer {
            Some(auth) => users_mgr.is_following(auth.user_id, user.id).await?,
            None => false,
        };

        let response = UserResponse::from_user(&user, is_subscribed);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Handle GET /api/users/subscriptions - followed authors with recipes
    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SubscriptionQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let page = PageParams {
            page: query.page,
            limit: query.limit,
        };

        let authors = resources
            .database
            .users()
            .following_authors(auth.user_id, page.limit(), page.offset())
            .await?;

        let mut views = Vec::with_capacity(authors.len());
        for author in &authors {
            views.push(
                Self::build_subscription(&resources, author, auth.user_id, query.recipes_limit)
                    .await?,
            );
        }

        let response = ListSubscriptionsResponse {
            total: views.len(),
            authors: views,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/users/:id/subscribe - follow an author
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<SubscriptionQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let author_id = parse_user_id(&id)?;

        let users_mgr = resources.database.users();
        let author = users_mgr
            .get_user(author_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        if author.id == auth.user_id {
            return Err(AppError::invalid_input("You cannot follow yourself"));
        }

        // Best-effort pre-check; the unique constraint still backstops races
        if users_mgr.is_following(auth.user_id, author.id).await? {
            return Err(AppError::invalid_input(
                "Follow already exists for this author",
            ));
        }

        users_mgr.create_follow(auth.user_id, author.id).await?;

        let response =
            Self::build_subscription(&resources, &author, auth.user_id, query.recipes_limit)
                .await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe - unfollow an author
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let author_id = parse_user_id(&id)?;

        let users_mgr = resources.database.users();
        users_mgr
            .get_user(author_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        if !users_mgr.delete_follow(auth.user_id, author_id).await? {
            return Err(AppError::invalid_input(
                "Follow does not exist for this author",
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid user id format"))
}
