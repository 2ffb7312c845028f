// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, auth, user, and catalog fixtures
#![allow(dead_code)]

//! Shared test utilities for `ladle`
//!
//! This module provides common test setup to reduce duplication across
//! integration tests. Tokens are minted here directly with the shared test
//! secret; in production the external identity service does that.

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use base64::{engine::general_purpose, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use ladle::{
    auth::{AuthManager, Claims},
    config::{AuthConfig, DatabaseUrl, Environment, LogLevel, MediaConfig, ServerConfig},
    database::Database,
    models::User,
    server::{self, ServerResources},
};
use serde_json::{json, Value};
use uuid::Uuid;

/// Shared secret used by every test token
pub const TEST_JWT_SECRET: &str = "test_jwt_secret";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Full test environment: in-memory database, media scratch dir, resources
pub struct TestContext {
    pub resources: Arc<ServerResources>,
    // Holds the media directory alive for the duration of the test
    _media_dir: tempfile::TempDir,
}

impl TestContext {
    /// Stand up an in-memory server environment
    pub async fn new() -> Result<Self> {
        init_test_logging();

        let media_dir = tempfile::tempdir()?;
        let config = Arc::new(ServerConfig {
            http_port: 8080,
            log_level: LogLevel::default(),
            environment: Environment::Testing,
            database: DatabaseUrl::Memory,
            auth: AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_owned(),
            },
            media: MediaConfig {
                directory: media_dir.path().to_path_buf(),
            },
        });

        let database = Database::new(&config.database.to_connection_string()).await?;
        let auth = AuthManager::new(config.auth.jwt_secret.as_bytes());

        Ok(Self {
            resources: Arc::new(ServerResources::new(database, auth, config)),
            _media_dir: media_dir,
        })
    }

    /// Build the full application router
    pub fn router(&self) -> Router {
        server::router(Arc::clone(&self.resources))
    }

    /// Create a user profile row
    pub async fn create_user(&self, username: &str) -> Result<User> {
        let user = User::new(
            username,
            format!("{username}@example.com"),
            "Test",
            "Cook",
        );
        self.resources.database.users().create_user(&user).await?;
        Ok(user)
    }

    /// Mint a bearer token for a user, the way the identity service would
    pub fn token_for(&self, user: &User) -> String {
        mint_token(user.id, &user.email)
    }

    /// Authorization header value for a user
    pub fn auth_header(&self, user: &User) -> String {
        format!("Bearer {}", self.token_for(user))
    }

    /// Seed a small catalog; returns (ingredient ids, tag ids).
    ///
    /// Ingredients: Flour/g, Sugar/g, Milk/ml. Tags: breakfast, lunch,
    /// dinner.
    pub async fn seed_catalog(&self) -> Result<(Vec<i64>, Vec<i64>)> {
        let catalog = self.resources.database.catalog();

        let mut ingredient_ids = Vec::new();
        for (name, unit) in [("Flour", "g"), ("Sugar", "g"), ("Milk", "ml")] {
            let (id, _) = catalog.get_or_create_ingredient(name, unit).await?;
            ingredient_ids.push(id);
        }

        let mut tag_ids = Vec::new();
        for (name, color, slug) in [
            ("Breakfast", "#E26C2D", "breakfast"),
            ("Lunch", "#49B64E", "lunch"),
            ("Dinner", "#8775D2", "dinner"),
        ] {
            let (id, _) = catalog.get_or_create_tag(name, color, slug).await?;
            tag_ids.push(id);
        }

        Ok((ingredient_ids, tag_ids))
    }
}

/// Mint an HS256 token with the shared test secret
pub fn mint_token(user_id: Uuid, email: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(24)).timestamp(),
        aud: "ladle".to_owned(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}

/// A tiny valid base64 image data URI
pub fn test_image_data_uri() -> String {
    let payload = general_purpose::STANDARD.encode(b"test image bytes");
    format!("data:image/png;base64,{payload}")
}

/// JSON body for a recipe submission
pub fn recipe_body(name: &str, ingredients: &[(i64, i64)], tags: &[i64]) -> Value {
    json!({
        "name": name,
        "text": "Mix everything and cook.",
        "cooking_time": 30,
        "image": test_image_data_uri(),
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
        "tags": tags,
    })
}
