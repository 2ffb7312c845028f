// ABOUTME: Recipe database operations - CRUD, filtered listing, and relationship pairs
// ABOUTME: Association rows are replaced wholesale inside a single transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::database::is_unique_violation;
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, IngredientAmount, IngredientRef, Recipe, Tag};

/// Filter for the recipe list query.
///
/// All predicates are conjunctive; an empty filter returns the full
/// collection. Tag ids are resolved from slugs before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// Only recipes carrying at least one of these tags
    pub tag_ids: Vec<i64>,
    /// Only recipes favorited by this user
    pub favorited_by: Option<Uuid>,
    /// Only recipes in this user's shopping list
    pub in_cart_of: Option<Uuid>,
    /// Page size
    pub limit: i64,
    /// Row offset
    pub offset: i64,
}

/// Recipe database operations manager
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    /// Insert a recipe and its association rows in one transaction.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the (author, name) pair is already
    /// taken, or a database error if any statement fails.
    pub async fn create_recipe(
        &self,
        recipe: &Recipe,
        ingredients: &[IngredientRef],
        tags: &[i64],
    ) -> AppResult<Uuid> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to start transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, author_id, name, image, text, cooking_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(recipe.author_id.to_string())
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .bind(recipe.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("A recipe with this name already exists for this author")
            } else {
                AppError::database(format!("Failed to create recipe: {e}"))
            }
        })?;

        Self::insert_associations(&mut tx, recipe.id, ingredients, tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(recipe.id)
    }

    /// Update a recipe, replacing all its association rows in one
    /// transaction (delete-all, recreate; no partial diff merge).
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the new name collides with another
    /// recipe by the same author, or a database error if any statement
    /// fails.
    pub async fn update_recipe(
        &self,
        recipe: &Recipe,
        ingredients: &[IngredientRef],
        tags: &[i64],
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to start transaction: {e}")))?;

        sqlx::query(
            r"
            UPDATE recipes
            SET name = $1, image = $2, text = $3, cooking_time = $4
            WHERE id = $5
            ",
        )
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .bind(recipe.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("A recipe with this name already exists for this author")
            } else {
                AppError::database(format!("Failed to update recipe: {e}"))
            }
        })?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear ingredients: {e}")))?;

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(recipe.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear tags: {e}")))?;

        Self::insert_associations(&mut tx, recipe.id, ingredients, tags).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe update: {e}")))?;

        Ok(())
    }

    async fn insert_associations(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        recipe_id: Uuid,
        ingredients: &[IngredientRef],
        tags: &[i64],
    ) -> AppResult<()> {
        for ingredient in ingredients {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(recipe_id.to_string())
            .bind(ingredient.id)
            .bind(ingredient.amount)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to attach ingredient: {e}")))?;
        }

        for tag_id in tags {
            sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
                .bind(recipe_id.to_string())
                .bind(tag_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to attach tag: {e}")))?;
        }

        Ok(())
    }

    /// Delete a recipe (association rows cascade), returning whether a row
    /// was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_recipe(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recipe(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| Self::row_to_recipe(&r)).transpose()
    }

    /// Whether the author already has a recipe with this name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recipe_exists_for_author(&self, author_id: Uuid, name: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM recipes WHERE author_id = $1 AND name = $2")
            .bind(author_id.to_string())
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe name: {e}")))?;

        Ok(row.is_some())
    }

    /// List recipes narrowed by the conjunction of the supplied filters.
    ///
    /// Tag membership joins are deduplicated; ordering is ascending
    /// publication date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_recipes(&self, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        // Tag ids come from our own catalog lookup, never from raw client
        // input, so they can be formatted into the clause directly.
        let tag_join = if filter.tag_ids.is_empty() {
            ""
        } else {
            "JOIN recipe_tags rt ON rt.recipe_id = r.id"
        };
        let tag_filter = if filter.tag_ids.is_empty() {
            String::new()
        } else {
            let ids = filter
                .tag_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("AND rt.tag_id IN ({ids})")
        };

        let query = format!(
            r"
            SELECT DISTINCT r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.created_at
            FROM recipes r
            {tag_join}
            WHERE ($1 = '' OR r.author_id = $1)
              AND ($2 = '' OR r.id IN (SELECT recipe_id FROM favorites WHERE user_id = $2))
              AND ($3 = '' OR r.id IN (SELECT recipe_id FROM shopping_list_items WHERE user_id = $3))
              {tag_filter}
            ORDER BY r.created_at ASC, r.id ASC
            LIMIT $4 OFFSET $5
            "
        );

        let rows = sqlx::query(&query)
            .bind(filter.author.map(|id| id.to_string()).unwrap_or_default())
            .bind(
                filter
                    .favorited_by
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            )
            .bind(
                filter
                    .in_cart_of
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            )
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(Self::row_to_recipe).collect()
    }

    /// Recipes by one author in publication order, optionally truncated
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recipes_by_author(
        &self,
        author_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, name, image, text, cooking_time, created_at
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            ",
        )
        .bind(author_id.to_string())
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list author recipes: {e}")))?;

        rows.iter().map(Self::row_to_recipe).collect()
    }

    /// Number of recipes by one author
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_recipes_by_author(&self, author_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM recipes WHERE author_id = $1")
            .bind(author_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        Ok(row.get("count"))
    }

    // ========================================================================
    // Memberships (recipe detail assembly)
    // ========================================================================

    /// Ingredient memberships of a recipe in association insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recipe_ingredients(&self, recipe_id: Uuid) -> AppResult<Vec<IngredientAmount>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| IngredientAmount {
                ingredient: Ingredient {
                    id: row.get("id"),
                    name: row.get("name"),
                    measurement_unit: row.get("measurement_unit"),
                },
                amount: row.get("amount"),
            })
            .collect())
    }

    /// Tag memberships of a recipe in association insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recipe_tags(&self, recipe_id: Uuid) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query(
            r"
            SELECT t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY rt.id
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load recipe tags: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| Tag {
                id: row.get("id"),
                name: row.get("name"),
                color: row.get("color"),
                slug: row.get("slug"),
            })
            .collect())
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Whether the user has favorited the recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_favorited(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        self.pair_exists("favorites", user_id, recipe_id).await
    }

    /// Create a favorite pair.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the pair already exists (unique
    /// constraint race loser), or a database error if the query fails.
    pub async fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        self.insert_pair("favorites", user_id, recipe_id, "Favorite already exists")
            .await
    }

    /// Delete a favorite pair, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        self.delete_pair("favorites", user_id, recipe_id).await
    }

    // ========================================================================
    // Shopping list
    // ========================================================================

    /// Whether the recipe is in the user's shopping list
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_in_shopping_cart(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        self.pair_exists("shopping_list_items", user_id, recipe_id)
            .await
    }

    /// Add a recipe to the user's shopping list.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the pair already exists (unique
    /// constraint race loser), or a database error if the query fails.
    pub async fn add_to_shopping_cart(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        self.insert_pair(
            "shopping_list_items",
            user_id,
            recipe_id,
            "Recipe is already in the shopping list",
        )
        .await
    }

    /// Remove a recipe from the user's shopping list, returning whether a
    /// row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn remove_from_shopping_cart(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> AppResult<bool> {
        self.delete_pair("shopping_list_items", user_id, recipe_id)
            .await
    }

    /// All (ingredient name, unit, amount) tuples across the user's
    /// shopping-list recipes, in association insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn shopping_list_rows(&self, user_id: Uuid) -> AppResult<Vec<(String, String, i64)>> {
        let rows = sqlx::query(
            r"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_list_items sl
            JOIN recipe_ingredients ri ON ri.recipe_id = sl.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sl.user_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load shopping list: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| (row.get("name"), row.get("measurement_unit"), row.get("amount")))
            .collect())
    }

    // ========================================================================
    // Shared pair plumbing (favorites / shopping_list_items)
    // ========================================================================

    async fn pair_exists(&self, table: &str, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let query = format!("SELECT 1 FROM {table} WHERE user_id = $1 AND recipe_id = $2");
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check {table}: {e}")))?;

        Ok(row.is_some())
    }

    async fn insert_pair(
        &self,
        table: &str,
        user_id: Uuid,
        recipe_id: Uuid,
        conflict_message: &str,
    ) -> AppResult<()> {
        let query =
            format!("INSERT INTO {table} (user_id, recipe_id, created_at) VALUES ($1, $2, $3)");
        sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(conflict_message)
                } else {
                    AppError::database(format!("Failed to insert into {table}: {e}"))
                }
            })?;

        Ok(())
    }

    async fn delete_pair(&self, table: &str, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let query = format!("DELETE FROM {table} WHERE user_id = $1 AND recipe_id = $2");
        let result = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete from {table}: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
        let id_str: String = row.get("id");
        let author_id_str: String = row.get("author_id");
        let created_at_str: String = row.get("created_at");

        Ok(Recipe {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
            author_id: Uuid::parse_str(&author_id_str)
                .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
            name: row.get("name"),
            image: row.get("image"),
            text: row.get("text"),
            cooking_time: row.get("cooking_time"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|e| AppError::database(format!("Invalid date: {e}")))?
                .with_timezone(&Utc),
        })
    }
}
