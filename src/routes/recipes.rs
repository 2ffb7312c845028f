// ABOUTME: Route handlers for recipes - CRUD, filters, favorites, shopping cart, download
// ABOUTME: Create/update accept JSON (base64 image) or multipart (file upload) bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Recipe routes.
//!
//! The list endpoint composes optional conjunctive filters (author, tag
//! slugs, favorited-by-me, in-my-cart). Create and update accept either a
//! JSON body carrying the image as a base64 data URI or a multipart form
//! with an `image` file part; on update the submitted ingredient/tag sets
//! replace the previous ones wholesale.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, ErrorCode};
use crate::media::{self, DecodedImage};
use crate::models::{IngredientAmount, IngredientRef, Recipe, RecipeDraft, Tag};
use crate::pagination::PageParams;
use crate::routes::users::UserResponse;
use crate::server::ServerResources;
use crate::shopping_list;

// ============================================================================
// Response Types
// ============================================================================

/// Ingredient membership in a recipe representation
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientAmountResponse {
    /// Catalog id
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount in the recipe
    pub amount: i64,
}

impl From<&IngredientAmount> for IngredientAmountResponse {
    fn from(membership: &IngredientAmount) -> Self {
        Self {
            id: membership.ingredient.id,
            name: membership.ingredient.name.clone(),
            measurement_unit: membership.ingredient.measurement_unit.clone(),
            amount: membership.amount,
        }
    }
}

/// Full recipe representation for list and detail endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub id: String,
    /// Tag memberships
    pub tags: Vec<Tag>,
    /// Author profile
    pub author: UserResponse,
    /// Ingredient memberships with amounts
    pub ingredients: Vec<IngredientAmountResponse>,
    /// Whether the requesting user has favorited this recipe
    pub is_favorited: bool,
    /// Whether this recipe is in the requesting user's shopping list
    pub is_in_shopping_cart: bool,
    /// Recipe name
    pub name: String,
    /// Stored image path
    pub image: String,
    /// Free-text description
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Publication date
    pub created_at: String,
}

/// Minimal recipe representation used by relationship-toggle responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortRecipeResponse {
    /// Recipe id
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Stored image path
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: i64,
}

impl From<&Recipe> for ShortRecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Recipes in this page
    pub recipes: Vec<RecipeResponse>,
    /// Count of recipes in this page
    pub total: usize,
}

// ============================================================================
// Request Types
// ============================================================================

/// JSON body for recipe create/update.
///
/// Every field is optional at the parse level; create requires all of them,
/// update requires the ingredient/tag sets and patches the rest.
#[derive(Debug, Deserialize, Default)]
pub struct RecipeBody {
    /// Recipe name
    pub name: Option<String>,
    /// Free-text description
    pub text: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: Option<i64>,
    /// Inline base64 data URI (`data:image/<ext>;base64,...`)
    pub image: Option<String>,
    /// Ingredient references
    pub ingredients: Option<Vec<IngredientRef>>,
    /// Tag ids
    pub tags: Option<Vec<i64>>,
}

/// Image carried by a submission, from either body flavor
enum ImageSource {
    /// Inline base64 data URI from a JSON body
    DataUri(String),
    /// Decoded multipart file part
    Upload(DecodedImage),
}

/// A parsed create/update submission, body-flavor agnostic
struct RecipeSubmission {
    name: Option<String>,
    text: Option<String>,
    cooking_time: Option<i64>,
    image: Option<ImageSource>,
    ingredients: Option<Vec<IngredientRef>>,
    tags: Option<Vec<i64>>,
}

impl From<RecipeBody> for RecipeSubmission {
    fn from(body: RecipeBody) -> Self {
        Self {
            name: body.name,
            text: body.text,
            cooking_time: body.cooking_time,
            image: body.image.map(ImageSource::DataUri),
            ingredients: body.ingredients,
            tags: body.tags,
        }
    }
}

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for the recipe list
#[derive(Debug, Deserialize, Default)]
pub struct RecipeListQuery {
    /// Only recipes by this author (user id)
    pub author: Option<String>,
    /// Tag slugs; repeatable, recipes matching any of them are returned
    #[serde(default)]
    pub tags: Vec<String>,
    /// Presence flag: only recipes favorited by the requesting user
    pub is_favorited: Option<String>,
    /// Presence flag: only recipes in the requesting user's shopping list
    pub is_in_shopping_cart: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

// A presence flag is on for any non-empty value
fn flag(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

// ============================================================================
// Routes
// ============================================================================

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/download_shopping_cart",
                get(Self::handle_download_shopping_cart),
            )
            .route(
                "/api/recipes/:id",
                get(Self::handle_detail)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/recipes/:id/favorite",
                axum::routing::post(Self::handle_add_favorite)
                    .delete(Self::handle_remove_favorite),
            )
            .route(
                "/api/recipes/:id/shopping_cart",
                axum::routing::post(Self::handle_add_to_cart)
                    .delete(Self::handle_remove_from_cart),
            )
            .with_state(resources)
    }

    /// Assemble the full representation of one recipe for a viewer
    async fn build_recipe_response(
        resources: &Arc<ServerResources>,
        recipe: &Recipe,
        viewer: Option<Uuid>,
    ) -> Result<RecipeResponse, AppError> {
        let users_mgr = resources.database.users();
        let recipes_mgr = resources.database.recipes();

        let author = users_mgr
            .get_user(recipe.author_id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe author row is missing"))?;

        let author_is_subscribed = match viewer {
            Some(viewer_id) => users_mgr.is_following(viewer_id, author.id).await?,
            None => false,
        };

        let tags = recipes_mgr.recipe_tags(recipe.id).await?;
        let ingredients = recipes_mgr.recipe_ingredients(recipe.id).await?;

        let (is_favorited, is_in_shopping_cart) = match viewer {
            Some(viewer_id) => (
                recipes_mgr.is_favorited(viewer_id, recipe.id).await?,
                recipes_mgr.is_in_shopping_cart(viewer_id, recipe.id).await?,
            ),
            None => (false, false),
        };

        Ok(RecipeResponse {
            id: recipe.id.to_string(),
            tags,
            author: UserResponse::from_user(&author, author_is_subscribed),
            ingredients: ingredients.iter().map(Into::into).collect(),
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at.to_rfc3339(),
        })
    }

    // ========================================================================
    // Body parsing (JSON or multipart)
    // ========================================================================

    /// Parse a create/update body from either supported content type
    async fn parse_submission(request: Request) -> Result<RecipeSubmission, AppError> {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| AppError::invalid_input(format!("Invalid multipart body: {e}")))?;
            Self::submission_from_multipart(multipart).await
        } else {
            let Json(body) = Json::<RecipeBody>::from_request(request, &())
                .await
                .map_err(|e| AppError::invalid_input(format!("Invalid JSON body: {e}")))?;
            Ok(body.into())
        }
    }

    async fn submission_from_multipart(
        mut multipart: Multipart,
    ) -> Result<RecipeSubmission, AppError> {
        let mut submission = RecipeSubmission {
            name: None,
            text: None,
            cooking_time: None,
            image: None,
            ingredients: None,
            tags: None,
        };
        let mut tags: Vec<i64> = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Invalid multipart body: {e}")))?
        {
            let field_name = field.name().unwrap_or_default().to_owned();
            match field_name.as_str() {
                "name" => submission.name = Some(field_text(field).await?),
                "text" => submission.text = Some(field_text(field).await?),
                "cooking_time" => {
                    let value = field_text(field).await?;
                    submission.cooking_time = Some(value.parse().map_err(|_| {
                        AppError::invalid_input("cooking_time must be an integer")
                    })?);
                }
                "image" => {
                    let content_type = field.content_type().unwrap_or_default().to_owned();
                    let data = field.bytes().await.map_err(|e| {
                        AppError::invalid_input(format!("Failed to read image upload: {e}"))
                    })?;
                    submission.image = Some(ImageSource::Upload(DecodedImage::from_mime(
                        &content_type,
                        data.to_vec(),
                    )?));
                }
                "ingredients" => {
                    let value = field_text(field).await?;
                    submission.ingredients = Some(serde_json::from_str(&value).map_err(|e| {
                        AppError::invalid_input(format!("Invalid ingredients JSON: {e}"))
                    })?);
                }
                "tags" => {
                    let value = field_text(field).await?;
                    tags.push(value.parse().map_err(|_| {
                        AppError::invalid_input("tags entries must be integer ids")
                    })?);
                }
                // Unknown parts are ignored, matching lenient form handling
                _ => {}
            }
        }

        if !tags.is_empty() {
            submission.tags = Some(tags);
        }

        Ok(submission)
    }

    /// Decode and store a submitted image, returning its media-relative path
    async fn store_submitted_image(
        resources: &Arc<ServerResources>,
        source: ImageSource,
    ) -> Result<String, AppError> {
        let image = match source {
            ImageSource::DataUri(uri) => DecodedImage::from_data_uri(&uri)?,
            ImageSource::Upload(image) => image,
        };
        media::store_image(&resources.config.media.directory, &image).await
    }

    /// Verify every referenced catalog id exists (400 on the first unknown)
    async fn check_catalog_refs(
        resources: &Arc<ServerResources>,
        draft: &RecipeDraft,
    ) -> Result<(), AppError> {
        let catalog = resources.database.catalog();
        let ingredient_ids: Vec<i64> = draft.ingredients.iter().map(|i| i.id).collect();
        catalog.ingredients_by_ids(&ingredient_ids).await?;
        catalog.tags_by_ids(&draft.tags).await?;
        Ok(())
    }

    // ========================================================================
    // Collection endpoints
    // ========================================================================

    /// Handle GET /api/recipes - filtered, paginated list
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth.optional_identity(&headers)?;

        let wants_favorited = flag(&query.is_favorited);
        let wants_cart = flag(&query.is_in_shopping_cart);

        // Personal filters are meaningless without an identity
        let viewer_id = match (&viewer, wants_favorited || wants_cart) {
            (Some(auth), _) => Some(auth.user_id),
            (None, true) => return Err(AppError::auth_required()),
            (None, false) => None,
        };

        let author = query
            .author
            .as_deref()
            .map(|id| {
                Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid author id format"))
            })
            .transpose()?;

        let tag_ids = if query.tags.is_empty() {
            Vec::new()
        } else {
            resources
                .database
                .catalog()
                .tags_by_slugs(&query.tags)
                .await?
                .into_iter()
                .map(|tag| tag.id)
                .collect()
        };

        let page = PageParams {
            page: query.page,
            limit: query.limit,
        };

        let filter = crate::database::RecipeFilter {
            author,
            tag_ids,
            favorited_by: if wants_favorited { viewer_id } else { None },
            in_cart_of: if wants_cart { viewer_id } else { None },
            limit: page.limit(),
            offset: page.offset(),
        };

        let recipes = resources.database.recipes().list_recipes(&filter).await?;

        let mut views = Vec::with_capacity(recipes.len());
        for recipe in &recipes {
            views.push(Self::build_recipe_response(&resources, recipe, viewer_id).await?);
        }

        let response = ListRecipesResponse {
            total: views.len(),
            recipes: views,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes - create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Request,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let submission = Self::parse_submission(request).await?;

        let draft = RecipeDraft {
            name: require(submission.name, "name")?,
            text: require(submission.text, "text")?,
            cooking_time: require(submission.cooking_time, "cooking_time")?,
            ingredients: require(submission.ingredients, "ingredients")?,
            tags: require(submission.tags, "tags")?,
        };
        let image = require(submission.image, "image")?;

        draft.validate()?;
        Self::check_catalog_refs(&resources, &draft).await?;

        let recipes_mgr = resources.database.recipes();

        // Best-effort pre-check; the unique constraint still backstops races
        if recipes_mgr
            .recipe_exists_for_author(auth.user_id, &draft.name)
            .await?
        {
            return Err(AppError::invalid_input(
                "You already have a recipe with this name",
            ));
        }

        let image_path = Self::store_submitted_image(&resources, image).await?;

        let recipe = Recipe::new(
            auth.user_id,
            draft.name.clone(),
            image_path,
            draft.text.clone(),
            draft.cooking_time,
        );
        recipes_mgr
            .create_recipe(&recipe, &draft.ingredients, &draft.tags)
            .await?;

        tracing::info!(recipe_id = %recipe.id, author_id = %auth.user_id, "recipe created");

        let response =
            Self::build_recipe_response(&resources, &recipe, Some(auth.user_id)).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    // ========================================================================
    // Item endpoints
    // ========================================================================

    /// Handle GET /api/recipes/:id - recipe detail
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth.optional_identity(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipe = resources
            .database
            .recipes()
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        let response =
            Self::build_recipe_response(&resources, &recipe, viewer.map(|a| a.user_id)).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /api/recipes/:id - update a recipe.
    ///
    /// The submitted ingredient and tag sets fully replace the previous
    /// association rows; the remaining fields are patch-optional.
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Request,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        let existing = recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if existing.author_id != auth.user_id {
            return Err(AppError::permission_denied(
                "Only the author can modify a recipe",
            ));
        }

        let submission = Self::parse_submission(request).await?;

        let draft = RecipeDraft {
            name: submission.name.unwrap_or_else(|| existing.name.clone()),
            text: submission.text.unwrap_or_else(|| existing.text.clone()),
            cooking_time: submission.cooking_time.unwrap_or(existing.cooking_time),
            ingredients: require(submission.ingredients, "ingredients")?,
            tags: require(submission.tags, "tags")?,
        };

        draft.validate()?;
        Self::check_catalog_refs(&resources, &draft).await?;

        if draft.name != existing.name
            && recipes_mgr
                .recipe_exists_for_author(auth.user_id, &draft.name)
                .await?
        {
            return Err(AppError::invalid_input(
                "You already have a recipe with this name",
            ));
        }

        let image_path = match submission.image {
            Some(source) => Self::store_submitted_image(&resources, source).await?,
            None => existing.image.clone(),
        };

        let updated = Recipe {
            id: existing.id,
            author_id: existing.author_id,
            name: draft.name.clone(),
            image: image_path,
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            created_at: existing.created_at,
        };
        recipes_mgr
            .update_recipe(&updated, &draft.ingredients, &draft.tags)
            .await?;

        let response =
            Self::build_recipe_response(&resources, &updated, Some(auth.user_id)).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - delete a recipe
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        let recipe = recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if recipe.author_id != auth.user_id {
            return Err(AppError::permission_denied(
                "Only the author can delete a recipe",
            ));
        }

        recipes_mgr.delete_recipe(recipe_id).await?;
        tracing::info!(recipe_id = %recipe_id, author_id = %auth.user_id, "recipe deleted");

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Handle POST /api/recipes/:id/favorite - add to favorites
    async fn handle_add_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        let recipe = recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if recipes_mgr.is_favorited(auth.user_id, recipe_id).await? {
            return Err(AppError::invalid_input(
                "Recipe is already in your favorites",
            ));
        }

        recipes_mgr.add_favorite(auth.user_id, recipe_id).await?;

        let response = ShortRecipeResponse::from(&recipe);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite - remove from favorites
    async fn handle_remove_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if !recipes_mgr.remove_favorite(auth.user_id, recipe_id).await? {
            return Err(AppError::invalid_input("Recipe is not in your favorites"));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    // ========================================================================
    // Shopping cart
    // ========================================================================

    /// Handle POST /api/recipes/:id/shopping_cart - add to the shopping list
    async fn handle_add_to_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        let recipe = recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if recipes_mgr
            .is_in_shopping_cart(auth.user_id, recipe_id)
            .await?
        {
            return Err(AppError::invalid_input(
                "Recipe is already in your shopping list",
            ));
        }

        recipes_mgr
            .add_to_shopping_cart(auth.user_id, recipe_id)
            .await?;

        let response = ShortRecipeResponse::from(&recipe);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart - remove from the list
    async fn handle_remove_from_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let recipe_id = parse_recipe_id(&id)?;

        let recipes_mgr = resources.database.recipes();
        recipes_mgr
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        if !recipes_mgr
            .remove_from_shopping_cart(auth.user_id, recipe_id)
            .await?
        {
            return Err(AppError::invalid_input(
                "Recipe is not in your shopping list",
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    // ========================================================================
    // Shopping-list download
    // ========================================================================

    /// Handle GET /api/recipes/download_shopping_cart - text attachment.
    ///
    /// An empty shopping list still yields a 200 attachment with an empty
    /// body.
    async fn handle_download_shopping_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let rows = resources
            .database
            .recipes()
            .shopping_list_rows(auth.user_id)
            .await?;

        let text = shopping_list::render(&shopping_list::aggregate(&rows));

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        shopping_list::ATTACHMENT_FILENAME
                    ),
                ),
            ],
            text,
        )
            .into_response())
    }
}

fn parse_recipe_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid recipe id format"))
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::new(ErrorCode::MissingRequiredField, format!("{field} is required")))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::invalid_input(format!("Invalid multipart field: {e}")))
}
