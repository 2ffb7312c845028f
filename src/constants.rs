// ABOUTME: Application constants organized by domain
// ABOUTME: Validation limits, pagination defaults, env var names, and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Application constants grouped by domain.

/// Service identity
pub mod service_names {
    /// Service name, also pinned as the JWT audience
    pub const LADLE: &str = "ladle";
}

/// Validation limits
pub mod limits {
    /// Smallest accepted cooking time, in minutes
    pub const MIN_COOKING_TIME: i64 = 1;

    /// Largest accepted cooking time, in minutes
    pub const MAX_COOKING_TIME: i64 = 32_000;

    /// Smallest accepted ingredient amount
    pub const MIN_INGREDIENT_AMOUNT: i64 = 1;

    /// Largest accepted ingredient amount
    pub const MAX_INGREDIENT_AMOUNT: i64 = 32_000;

    /// Request body cap, large enough for inline base64 images
    pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

    /// Per-request handling timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Pagination defaults
pub mod pagination {
    /// Page size when the client does not supply `limit`
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Largest page size a client may request
    pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Environment variable names read by `ServerConfig::from_env`
pub mod env_names {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Database connection string (`sqlite:...` or `sqlite::memory:`)
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// Shared secret for validating externally issued JWTs
    pub const JWT_SECRET: &str = "JWT_SECRET";

    /// Directory for stored recipe images
    pub const MEDIA_DIR: &str = "MEDIA_DIR";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;

    /// Default SQLite database path
    pub const DATABASE_URL: &str = "sqlite:./data/ladle.db";

    /// Default media directory
    pub const MEDIA_DIR: &str = "./media";
}
