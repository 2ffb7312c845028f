// ABOUTME: Main library entry point for the Ladle recipe-sharing API
// ABOUTME: Provides REST endpoints for recipes, subscriptions, favorites, and shopping lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

#![deny(unsafe_code)]

//! # Ladle
//!
//! A recipe-sharing web backend. Users create and browse recipes with
//! ingredients and tags, follow other authors, mark favorites, and export a
//! shopping list aggregating ingredient quantities across the recipes they
//! have queued up.
//!
//! ## Architecture
//!
//! - **Models**: plain domain structs (users, catalog, recipes)
//! - **Database**: SQLite via sqlx, one manager per domain
//! - **Routes**: axum routers per domain with thin handlers
//! - **Auth**: validates HS256 JWTs minted by an external identity service
//!
//! ## Example
//!
//! ```rust,no_run
//! use ladle::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ladle configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and request identity
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Database pool, migrations, and per-domain managers
pub mod database;

/// Unified error handling
pub mod errors;

/// Logging configuration
pub mod logging;

/// Recipe image intake and storage
pub mod media;

/// Domain models
pub mod models;

/// Page-number pagination
pub mod pagination;

/// HTTP routes organized by domain
pub mod routes;

/// Server assembly and serve loop
pub mod server;

/// Shopping-list aggregation
pub mod shopping_list;
