// ABOUTME: Recipe model and the validated submission draft
// ABOUTME: Draft validation enforces ingredient/tag presence, uniqueness, and value bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::Ingredient;

/// A recipe owned by exactly one author.
///
/// Ingredient and tag memberships live in association rows and are loaded
/// separately; `image` is the media-relative path of the stored picture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Owning author
    pub author_id: Uuid,
    /// Recipe name, unique per author
    pub name: String,
    /// Stored image path, relative to the media directory
    pub image: String,
    /// Free-text description
    pub text: String,
    /// Cooking time in minutes, within [1, 32000]
    pub cooking_time: i64,
    /// Publication date; list ordering is ascending by it
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe with a fresh id and the current publication date
    #[must_use]
    pub fn new(
        author_id: Uuid,
        name: impl Into<String>,
        image: impl Into<String>,
        text: impl Into<String>,
        cooking_time: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            name: name.into(),
            image: image.into(),
            text: text.into(),
            cooking_time,
            created_at: Utc::now(),
        }
    }
}

/// An ingredient reference inside a recipe submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientRef {
    /// Catalog id of the ingredient
    pub id: i64,
    /// Amount in the ingredient's measurement unit, within [1, 32000]
    pub amount: i64,
}

/// A hydrated ingredient membership used in recipe representations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientAmount {
    /// The catalog ingredient
    pub ingredient: Ingredient,
    /// Amount carried by the association row
    pub amount: i64,
}

/// A validated recipe submission (create or full-replace update).
///
/// The referenced catalog ids are checked for existence at the database
/// layer; `validate` covers everything checkable without storage access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Recipe name
    pub name: String,
    /// Free-text description
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Ingredient references, at least one, unique by id
    pub ingredients: Vec<IngredientRef>,
    /// Tag ids, at least one, unique
    pub tags: Vec<i64>,
}

impl RecipeDraft {
    /// Validate the submission against the recipe invariants
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` or `ValueOutOfRange` error when the draft
    /// has no ingredients or tags, repeats an ingredient or tag id, or
    /// carries a cooking time or amount outside [1, 32000].
    pub fn validate(&self) -> AppResult<()> {
        if self.ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "A recipe needs at least one ingredient",
            ));
        }

        let mut seen_ingredients = HashSet::new();
        for ingredient in &self.ingredients {
            if !seen_ingredients.insert(ingredient.id) {
                return Err(AppError::invalid_input(
                    "Ingredients must be unique within a recipe",
                ));
            }
            if ingredient.amount < limits::MIN_INGREDIENT_AMOUNT
                || ingredient.amount > limits::MAX_INGREDIENT_AMOUNT
            {
                return Err(AppError::out_of_range(format!(
                    "Ingredient amount must be between {} and {}",
                    limits::MIN_INGREDIENT_AMOUNT,
                    limits::MAX_INGREDIENT_AMOUNT
                )));
            }
        }

        if self.tags.is_empty() {
            return Err(AppError::invalid_input("A recipe needs at least one tag"));
        }

        let mut seen_tags = HashSet::new();
        for tag in &self.tags {
            if !seen_tags.insert(*tag) {
                return Err(AppError::invalid_input(
                    "Tags must be unique within a recipe",
                ));
            }
        }

        if self.cooking_time < limits::MIN_COOKING_TIME
            || self.cooking_time > limits::MAX_COOKING_TIME
        {
            return Err(AppError::out_of_range(format!(
                "Cooking time must be between {} and {} minutes",
                limits::MIN_COOKING_TIME,
                limits::MAX_COOKING_TIME
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Pancakes".into(),
            text: "Mix and fry.".into(),
            cooking_time: 20,
            ingredients: vec![IngredientRef { id: 1, amount: 100 }],
            tags: vec![1],
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_no_ingredients_rejected() {
        let mut d = draft();
        d.ingredients.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_no_tags_rejected() {
        let mut d = draft();
        d.tags.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_duplicate_ingredient_ids_rejected() {
        let mut d = draft();
        d.ingredients.push(IngredientRef { id: 1, amount: 50 });
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_duplicate_tag_ids_rejected() {
        let mut d = draft();
        d.tags.push(1);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_amount_bounds() {
        let mut d = draft();
        d.ingredients[0].amount = 0;
        assert!(d.validate().is_err());
        d.ingredients[0].amount = 1;
        assert!(d.validate().is_ok());
        d.ingredients[0].amount = 32_000;
        assert!(d.validate().is_ok());
        d.ingredients[0].amount = 32_001;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_cooking_time_bounds() {
        let mut d = draft();
        d.cooking_time = 0;
        assert!(d.validate().is_err());
        d.cooking_time = 1;
        assert!(d.validate().is_ok());
        d.cooking_time = 32_000;
        assert!(d.validate().is_ok());
        d.cooking_time = 32_001;
        assert!(d.validate().is_err());
    }
}
