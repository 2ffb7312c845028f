// ABOUTME: Domain model module organization
// ABOUTME: Users, catalog reference data (ingredients/tags), and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Domain models.
//!
//! Plain data structs shared between the database managers and the route
//! layer. Request/response DTOs live next to the routes that use them.

mod catalog;
mod recipe;
mod user;

pub use catalog::{Ingredient, Tag};
pub use recipe::{IngredientAmount, IngredientRef, Recipe, RecipeDraft};
pub use user::User;
