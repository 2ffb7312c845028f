// ABOUTME: Catalog reference data models - ingredients and tags
// ABOUTME: Seeded out-of-band and referenced by id from recipe submissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use serde::{Deserialize, Serialize};

/// An ingredient with its measurement unit.
///
/// Unique per (name, `measurement_unit`) pair; the same ingredient name may
/// appear once per unit (e.g. "Butter"/"g" and "Butter"/"tbsp").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Catalog identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit the amounts are expressed in
    pub measurement_unit: String,
}

/// A recipe tag (e.g. breakfast, lunch, dinner).
///
/// Name, color, and slug are each globally unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Catalog identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Hex display color (e.g. `#49B64E`)
    pub color: String,
    /// URL-safe identifier used by the recipe list filter
    pub slug: String,
}
