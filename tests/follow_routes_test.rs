// ABOUTME: HTTP integration tests for author subscriptions and profile reads
// ABOUTME: Covers self-follow, duplicate pairs, delete-missing, and the subscriptions view
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Integration tests for the user/subscription endpoints.

mod common;
mod helpers;

use common::{recipe_body, TestContext};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

async fn create_recipe(
    ctx: &TestContext,
    user: &ladle::models::User,
    name: &str,
) -> String {
    let (ingredients, tags) = ctx.seed_catalog().await.unwrap();
    let body = recipe_body(name, &[(ingredients[0], 10)], &[tags[0]]);
    let response = AxumTestRequest::post("/api/recipes")
        .header("authorization", &ctx.auth_header(user))
        .json(&body)
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 201, "creating {name}");
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_owned()
}

// ============================================================================
// Subscribe / unsubscribe
// ============================================================================

#[tokio::test]
async fn test_subscribe_returns_profile_with_recipes() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();
    let bob = ctx.create_user("bob").await.unwrap();
    create_recipe(&ctx, &bob, "Bob Bread").await;

    let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["username"], "bob");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 1);
    assert_eq!(body["recipes"][0]["name"], "Bob Bread");
    // Short views only: no ingredient detail in the embedded recipes
    assert!(body["recipes"][0].get("ingredients").is_none());
}

#[tokio::test]
async fn test_self_follow_rejected() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();

    let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", alice.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_duplicate_follow_rejected() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();
    let bob = ctx.create_user("bob").await.unwrap();

    let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_subscribe_unknown_author_is_404() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();

    let response = AxumTestRequest::post(&format!(
        "/api/users/{}/subscribe",
        uuid::Uuid::new_v4()
    ))
    .header("authorization", &ctx.auth_header(&alice))
    .send(ctx.router())
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_unsubscribe() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();
    let bob = ctx.create_user("bob").await.unwrap();

    AxumTestRequest::post(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;

    let response = AxumTestRequest::delete(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 204);

    // Deleting a missing relationship is rejected
    let response = AxumTestRequest::delete(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 400);
}

// ============================================================================
// Subscriptions list
// ============================================================================

#[tokio::test]
async fn test_subscriptions_list_with_recipes_limit() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();
    let bob = ctx.create_user("bob").await.unwrap();
    let carol = ctx.create_user("carol").await.unwrap();

    create_recipe(&ctx, &bob, "Bob Bread").await;
    create_recipe(&ctx, &bob, "Bob Soup").await;
    create_recipe(&ctx, &carol, "Carol Cake").await;

    for author in [&bob, &carol] {
        let response = AxumTestRequest::post(&format!("/api/users/{}/subscribe", author.id))
            .header("authorization", &ctx.auth_header(&alice))
            .send(ctx.router())
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = AxumTestRequest::get("/api/users/subscriptions?recipes_limit=1")
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], 2);

    let bob_view = body["authors"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["username"] == "bob")
        .unwrap();
    // The embedded list is truncated, the count is not
    assert_eq!(bob_view["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(bob_view["recipes_count"], 2);
    assert_eq!(bob_view["is_subscribed"], true);
}

#[tokio::test]
async fn test_subscriptions_requires_auth() {
    let ctx = TestContext::new().await.expect("setup failed");

    let response = AxumTestRequest::get("/api/users/subscriptions")
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 401);
}

// ============================================================================
// Profile reads
// ============================================================================

#[tokio::test]
async fn test_user_detail_personalizes_is_subscribed() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();
    let bob = ctx.create_user("bob").await.unwrap();

    AxumTestRequest::post(&format!("/api/users/{}/subscribe", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;

    let response = AxumTestRequest::get(&format!("/api/users/{}", bob.id))
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["is_subscribed"], true);

    // Anonymous read works, flag stays false
    let response = AxumTestRequest::get(&format!("/api/users/{}", bob.id))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["is_subscribed"], false);
}

#[tokio::test]
async fn test_user_detail_unknown_is_404() {
    let ctx = TestContext::new().await.expect("setup failed");

    let response = AxumTestRequest::get(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_me_returns_own_profile() {
    let ctx = TestContext::new().await.expect("setup failed");
    let alice = ctx.create_user("alice").await.unwrap();

    let response = AxumTestRequest::get("/api/users/me")
        .header("authorization", &ctx.auth_header(&alice))
        .send(ctx.router())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");

    let response = AxumTestRequest::get("/api/users/me").send(ctx.router()).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_list_users_ordered_by_username() {
    let ctx = TestContext::new().await.expect("setup failed");
    ctx.create_user("carol").await.unwrap();
    ctx.create_user("alice").await.unwrap();
    ctx.create_user("bob").await.unwrap();

    let response = AxumTestRequest::get("/api/users").send(ctx.router()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let usernames: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["alice", "bob", "carol"]);
}
