// ABOUTME: Catalog seeding utility - loads ingredients and tags from a JSON file
// ABOUTME: Get-or-create semantics, duplicate rows are skipped rather than errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Catalog seeder for the Ladle server.
//!
//! Loads the ingredient and tag reference data into the database. Run once
//! before serving traffic; reruns are harmless (existing rows are skipped).
//!
//! Usage:
//! ```bash
//! # Seed from fixtures/catalog.json (uses DATABASE_URL from environment)
//! cargo run --bin seed-catalog
//!
//! # Override the catalog file or database URL
//! cargo run --bin seed-catalog -- --file /srv/ladle/catalog.json \
//!     --database-url sqlite:./data/ladle.db
//! ```
//!
//! File format:
//! ```json
//! {
//!   "ingredients": [{"name": "Flour", "measurement_unit": "g"}],
//!   "tags": [{"name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"}]
//! }
//! ```

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ladle::config::DatabaseUrl;
use ladle::database::Database;
use ladle::logging;
use serde::Deserialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-catalog", about = "Ladle catalog seeder")]
struct SeedArgs {
    /// Path to the catalog JSON file
    #[arg(long, default_value = "fixtures/catalog.json")]
    file: PathBuf,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    ingredients: Vec<IngredientSeed>,
    #[serde(default)]
    tags: Vec<TagSeed>,
}

#[derive(Debug, Deserialize)]
struct IngredientSeed {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagSeed {
    name: String,
    color: String,
    slug: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = SeedArgs::parse();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .map_or_else(DatabaseUrl::default, |url| DatabaseUrl::parse_url(&url));

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read catalog file {}", args.file.display()))?;
    let catalog_file: CatalogFile =
        serde_json::from_str(&contents).context("Failed to parse catalog JSON")?;

    let database = Database::new(&database_url.to_connection_string()).await?;
    let catalog = database.catalog();

    let mut ingredients_created = 0usize;
    for seed in &catalog_file.ingredients {
        let (_, created) = catalog
            .get_or_create_ingredient(&seed.name, &seed.measurement_unit)
            .await?;
        if created {
            ingredients_created += 1;
        }
    }
    info!(
        "Ingredients: {} loaded, {} already present",
        ingredients_created,
        catalog_file.ingredients.len() - ingredients_created
    );

    let mut tags_created = 0usize;
    for seed in &catalog_file.tags {
        let (_, created) = catalog
            .get_or_create_tag(&seed.name, &seed.color, &seed.slug)
            .await?;
        if created {
            tags_created += 1;
        }
    }
    info!(
        "Tags: {} loaded, {} already present",
        tags_created,
        catalog_file.tags.len() - tags_created
    );

    Ok(())
}
