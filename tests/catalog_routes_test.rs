// ABOUTME: HTTP integration tests for catalog reference data endpoints
// ABOUTME: Ingredients list and prefix search, tags list, item lookups, health probe
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Integration tests for the read-only catalog endpoints.

mod common;
mod helpers;

use common::TestContext;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_list_ingredients_sorted_by_name() {
    let ctx = TestContext::new().await.expect("setup failed");
    ctx.seed_catalog().await.unwrap();

    let response = AxumTestRequest::get("/api/ingredients")
        .send(ctx.router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Flour", "Milk", "Sugar"]);
}

#[tokio::test]
async fn test_ingredient_name_prefix_search() {
    let ctx = TestContext::new().await.expect("setup failed");
    ctx.seed_catalog().await.unwrap();

    let response = AxumTestRequest::get("/api/ingredients?name=Fl")
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Flour");
    assert_eq!(body[0]["measurement_unit"], "g");

    // Prefix, not substring: "lour" matches nothing
    let response = AxumTestRequest::get("/api/ingredients?name=lour")
        .send(ctx.router())
        .await;
    let body: Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_ingredient_by_id() {
    let ctx = TestContext::new().await.expect("setup failed");
    let (ingredient_ids, _) = ctx.seed_catalog().await.unwrap();

    let response = AxumTestRequest::get(&format!("/api/ingredients/{}", ingredient_ids[0]))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["name"], "Flour");

    let response = AxumTestRequest::get("/api/ingredients/999999")
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_list_tags() {
    let ctx = TestContext::new().await.expect("setup failed");
    ctx.seed_catalog().await.unwrap();

    let response = AxumTestRequest::get("/api/tags").send(ctx.router()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["breakfast", "dinner", "lunch"]);
    assert_eq!(body[0]["color"], "#E26C2D");
}

#[tokio::test]
async fn test_get_tag_by_id() {
    let ctx = TestContext::new().await.expect("setup failed");
    let (_, tag_ids) = ctx.seed_catalog().await.unwrap();

    let response = AxumTestRequest::get(&format!("/api/tags/{}", tag_ids[2]))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["slug"], "dinner");

    let response = AxumTestRequest::get("/api/tags/999999")
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let ctx = TestContext::new().await.expect("setup failed");
    let (first_ingredients, first_tags) = ctx.seed_catalog().await.unwrap();
    let (second_ingredients, second_tags) = ctx.seed_catalog().await.unwrap();

    // Re-seeding finds the same rows instead of duplicating them
    assert_eq!(first_ingredients, second_ingredients);
    assert_eq!(first_tags, second_tags);

    let response = AxumTestRequest::get("/api/ingredients")
        .send(ctx.router())
        .await;
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = TestContext::new().await.expect("setup failed");

    let response = AxumTestRequest::get("/health").send(ctx.router()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ladle");
    assert_eq!(body["database"], true);
}
