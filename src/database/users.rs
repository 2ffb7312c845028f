// ABOUTME: User and follow database operations
// ABOUTME: Profile reads, follow pair create/delete, and followed-author listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::database::is_unique_violation;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// User and follow database operations manager
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Insert a user profile row.
    ///
    /// Profiles normally arrive out-of-band (identity service, seed tool);
    /// this is the write path those collaborators use.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the username or email is already taken,
    /// or a database error if the query fails.
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("A user with this username or email already exists")
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, email, first_name, last_name, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// List user profiles ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_users(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT id, username, email, first_name, last_name, created_at
            FROM users
            ORDER BY username
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    // ========================================================================
    // Follows
    // ========================================================================

    /// Whether `user_id` follows `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2",
        )
        .bind(user_id.to_string())
        .bind(author_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check follow: {e}")))?;

        Ok(row.is_some())
    }

    /// Create a follow pair.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the pair already exists (unique
    /// constraint race loser), or a database error if the query fails.
    pub async fn create_follow(&self, user_id: Uuid, author_id: Uuid) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO follows (user_id, author_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(author_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Follow already exists")
            } else {
                AppError::database(format!("Failed to create follow: {e}"))
            }
        })?;

        Ok(())
    }

    /// Delete a follow pair, returning whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_follow(&self, user_id: Uuid, author_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
            .bind(user_id.to_string())
            .bind(author_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete follow: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Authors followed by `user_id`, ordered by username
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn following_authors(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.created_at
            FROM users u
            JOIN follows f ON f.author_id = u.id
            WHERE f.user_id = $1
            ORDER BY u.username
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list followed authors: {e}")))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(User {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| AppError::database(format!("Invalid UUID: {e}")))?,
            username: row.get("username"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|e| AppError::database(format!("Invalid date: {e}")))?
                .with_timezone(&Utc),
        })
    }
}
