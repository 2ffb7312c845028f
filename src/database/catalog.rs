// ABOUTME: Catalog reference data database operations - ingredients and tags
// ABOUTME: Read paths for the API plus get-or-create paths for the seed tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, Tag};

/// Catalog reference data operations manager
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Ingredients
    // ========================================================================

    /// List ingredients, optionally narrowed to a name prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_ingredients(&self, name_prefix: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = match name_prefix {
            Some(prefix) => {
                let pattern = format!("{}%", escape_like(prefix));
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE name LIKE $1 ESCAPE '\'
                    ORDER BY name
                    ",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    ORDER BY name
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_ingredient(&self, id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        Ok(row.as_ref().map(row_to_ingredient))
    }

    /// Fetch ingredients for a set of ids, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error naming the first unknown id, or a
    /// database error if the query fails.
    pub async fn ingredients_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Ingredient>> {
        let mut ingredients = Vec::with_capacity(ids.len());
        for &id in ids {
            let ingredient = self.get_ingredient(id).await?.ok_or_else(|| {
                AppError::invalid_input(format!("Unknown ingredient id: {id}"))
            })?;
            ingredients.push(ingredient);
        }
        Ok(ingredients)
    }

    /// Insert an ingredient unless the (name, unit) pair already exists.
    ///
    /// Returns the row id and whether a new row was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_or_create_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> AppResult<(i64, bool)> {
        let existing = sqlx::query(
            "SELECT id FROM ingredients WHERE name = $1 AND measurement_unit = $2",
        )
        .bind(name)
        .bind(measurement_unit)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up ingredient: {e}")))?;

        if let Some(row) = existing {
            return Ok((row.get("id"), false));
        }

        let result = sqlx::query(
            "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2)",
        )
        .bind(name)
        .bind(measurement_unit)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredient: {e}")))?;

        Ok((result.last_insert_rowid(), true))
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// List all tags ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, color, slug FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;

        Ok(rows.iter().map(row_to_tag).collect())
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tag(&self, id: i64) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get tag: {e}")))?;

        Ok(row.as_ref().map(row_to_tag))
    }

    /// Fetch tags for a set of ids, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error naming the first unknown id, or a
    /// database error if the query fails.
    pub async fn tags_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Tag>> {
        let mut tags = Vec::with_capacity(ids.len());
        for &id in ids {
            let tag = self
                .get_tag(id)
                .await?
                .ok_or_else(|| AppError::invalid_input(format!("Unknown tag id: {id}")))?;
            tags.push(tag);
        }
        Ok(tags)
    }

    /// Resolve tag slugs used by the recipe list filter.
    ///
    /// # Errors
    ///
    /// Returns a `ResourceNotFound` error naming the first unknown slug, or
    /// a database error if the query fails.
    pub async fn tags_by_slugs(&self, slugs: &[String]) -> AppResult<Vec<Tag>> {
        let mut tags = Vec::with_capacity(slugs.len());
        for slug in slugs {
            let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up tag: {e}")))?;

            let tag = row
                .as_ref()
                .map(row_to_tag)
                .ok_or_else(|| AppError::not_found(format!("Tag '{slug}'")))?;
            tags.push(tag);
        }
        Ok(tags)
    }

    /// Insert a tag unless one with the same name already exists.
    ///
    /// Returns the row id and whether a new row was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_or_create_tag(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> AppResult<(i64, bool)> {
        let existing = sqlx::query("SELECT id FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up tag: {e}")))?;

        if let Some(row) = existing {
            return Ok((row.get("id"), false));
        }

        let result = sqlx::query("INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create tag: {e}")))?;

        Ok((result.last_insert_rowid(), true))
    }
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        measurement_unit: row.get("measurement_unit"),
    }
}

fn row_to_tag(row: &SqliteRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
        color: row.get("color"),
        slug: row.get("slug"),
    }
}

// LIKE wildcards in user input would widen the prefix search
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
