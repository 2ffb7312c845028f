// ABOUTME: User model for recipe authors and their social relationships
// ABOUTME: Rows are provisioned out-of-band by the identity service or the seed tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// Registration and credential management belong to the external identity
/// service; this server only reads profiles and owns the relationships
/// (recipes, follows, favorites, shopping lists) hanging off them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// When the profile row was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user profile with a fresh id
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_unique_ids() {
        let a = User::new("alice", "alice@example.com", "Alice", "Archer");
        let b = User::new("bob", "bob@example.com", "Bob", "Baker");
        assert_ne!(a.id, b.id);
        assert_eq!(a.username, "alice");
    }
}
