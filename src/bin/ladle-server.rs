// ABOUTME: Main server binary - loads configuration, migrates the database, serves HTTP
// ABOUTME: Token issuance lives in the external identity service; this validates only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! # Ladle Server Binary
//!
//! Starts the recipe-sharing REST API with database management and JWT
//! validation of externally issued identity tokens.

use anyhow::Result;
use clap::Parser;
use ladle::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ladle-server")]
#[command(about = "Ladle - recipe sharing REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Ladle server");
    info!("{}", config.summary());

    // Initialize database and run migrations
    let database = Database::new(&config.database.to_connection_string()).await?;
    info!("Database initialized: {}", config.database);

    // Token validator for the identity service's shared secret
    let auth = AuthManager::new(config.auth.jwt_secret.as_bytes());

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, auth, Arc::clone(&config)));

    info!("Ready to serve recipes on port {}", config.http_port);

    server::run(resources, config.http_port).await
}
