// ABOUTME: Route module organization for Ladle HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Route module for the Ladle server.
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains its request/response DTOs and thin handler functions that
//! delegate to the database managers.

/// Ingredient and tag reference data routes
pub mod catalog;
/// Health check routes
pub mod health;
/// Recipe CRUD, favorites, shopping cart, and shopping-list download routes
pub mod recipes;
/// User profile and subscription routes
pub mod users;

/// Catalog route handlers
pub use catalog::CatalogRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
/// User route handlers
pub use users::UserRoutes;
