//! Integration tests for API endpoints.
//!
//! The real router and services run over in-memory repositories, so every
//! request goes through middleware, extractors and error rendering.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{login, send, send_with_authorization, services, test_app, InMemory, StaticHealth};
use store_rater::api::{create_router, AppState};
use store_rater::domain::UserRole;

async fn register(app: &axum::Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await
}

async fn token_for(app: &axum::Router, name: &str, email: &str) -> String {
    let (status, body) = register(app, name, email, "pw").await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &axum::Router, db: &InMemory) -> String {
    db.seed_user("Admin", "admin@example.com", "admin-pw", UserRole::Admin);
    login(app, "admin@example.com", "admin-pw").await
}

async fn create_store(app: &axum::Router, admin: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/stores", Some(admin), Some(body)).await
}

async fn rate(app: &axum::Router, token: &str, store_id: i64, value: i64) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/stores/{store_id}/ratings"),
        Some(token),
        Some(json!({ "rating_value": value })),
    )
    .await
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_then_duplicate() {
    let (app, _) = test_app();

    let (status, body) = register(&app, "A", "a@a.com", "x").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "a@a.com");
    assert_eq!(body["user"]["role"], "USER");
    assert!(body["user"].get("password").is_none());

    let (status, body) = register(&app, "A", "a@a.com", "x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User already exists");
}

#[tokio::test]
async fn test_register_requires_fields() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": "A", "email": "a@a.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Please enter all required fields");
}

#[tokio::test]
async fn test_register_without_email_reports_required() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": "A", "password": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Please enter all required fields");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let (app, _) = test_app();

    let (status, _) = register(&app, "A", "not-an-email", "x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_share_message() {
    let (app, _) = test_app();
    register(&app, "A", "a@a.com", "right").await;

    for (email, password) in [("a@a.com", "wrong"), ("nobody@a.com", "right")] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid credentials");
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@a.com", "password": "right" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "A");
}

#[tokio::test]
async fn test_update_password() {
    let (app, _) = test_app();
    let token = token_for(&app, "A", "a@a.com").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/updatepassword",
        Some(&token),
        Some(json!({ "currentPassword": "nope", "newPassword": "fresh" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Incorrect current password");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/updatepassword",
        Some(&token),
        Some(json!({ "currentPassword": "pw", "newPassword": "fresh" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Password updated successfully");

    login(&app, "a@a.com", "fresh").await;
}

#[tokio::test]
async fn test_update_password_requires_token() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/updatepassword",
        None,
        Some(json!({ "currentPassword": "a", "newPassword": "b" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Not authorized, no token");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_profile_authentication() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/api/users/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Not authorized, no token");

    let (status, body) = send(&app, Method::GET, "/api/users/profile", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Not authorized, token failed");

    let (status, body) = send_with_authorization(&app, "/api/users/profile", "Basic xyz").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Not authorized, no token");

    let token = token_for(&app, "A", "a@a.com").await;
    let (status, body) = send(&app, Method::GET, "/api/users/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "A");
    assert_eq!(body["role"], "USER");
    assert!(body.get("address").is_some());
}

#[tokio::test]
async fn test_admin_stuff_requires_admin() {
    let (app, db) = test_app();
    let user = token_for(&app, "A", "a@a.com").await;
    let admin = admin_token(&app, &db).await;

    let (status, _) = send(&app, Method::GET, "/api/users/admin-stuff", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/users/admin-stuff", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "You have accessed admin-only content!");
}

// =============================================================================
// Stores & ratings
// =============================================================================

#[tokio::test]
async fn test_create_store_permissions_and_owner() {
    let (app, db) = test_app();
    let user = token_for(&app, "A", "a@a.com").await;
    let admin = admin_token(&app, &db).await;
    let body = json!({ "name": "Shop", "email": "shop@example.com" });

    let (status, _) = send(&app, Method::POST, "/api/stores", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = create_store(&app, &user, body.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = create_store(&app, &admin, body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Shop");
    assert!(created["owner_id"].is_null());

    let (status, body) = create_store(
        &app,
        &admin,
        json!({ "name": "Ghost", "email": "g@example.com", "ownerId": 999 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Owner not found");

    let (status, body) = create_store(
        &app,
        &admin,
        json!({ "name": "Owned", "email": "o@example.com", "ownerId": "1", "address": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner_id"], 1);
}

#[tokio::test]
async fn test_create_store_without_email_reports_required() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;

    let (status, body) = create_store(&app, &admin, json!({ "name": "Shop" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Please enter all required fields");
}

#[tokio::test]
async fn test_store_not_found() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/api/stores/42", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Store not found");
}

#[tokio::test]
async fn test_non_numeric_ids_render_json_errors() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;

    let (status, body) = send(&app, Method::GET, "/api/stores/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["msg"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/stores/abc/ratings", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/admin/users/abc", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rating_upsert_updates_aggregate() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    let alice = token_for(&app, "Alice", "alice@example.com").await;
    let bob = token_for(&app, "Bob", "bob@example.com").await;
    create_store(&app, &admin, json!({ "name": "Shop", "email": "s@example.com" })).await;

    let (_, store) = send(&app, Method::GET, "/api/stores/1", None, None).await;
    assert_eq!(store["averageRating"], 0.0);
    assert_eq!(store["ratingCount"], 0);

    let (status, first) = rate(&app, &alice, 1, 4).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = rate(&app, &alice, 1, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["rating_value"], 2);

    let (_, store) = send(&app, Method::GET, "/api/stores/1", None, None).await;
    assert_eq!(store["ratingCount"], 1);
    assert_eq!(store["averageRating"], 2.0);

    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/stores/1/ratings",
        Some(&bob),
        Some(json!({ "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, store) = send(&app, Method::GET, "/api/stores/1", None, None).await;
    assert_eq!(store["ratingCount"], 2);
    assert_eq!(store["averageRating"], 3.5);

    let (status, ratings) = send(&app, Method::GET, "/api/stores/1/ratings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = ratings
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob", "Alice"]);

    tokio::time::sleep(Duration::from_millis(5)).await;
    rate(&app, &alice, 1, 3).await;

    let (_, ratings) = send(&app, Method::GET, "/api/stores/1/ratings", None, None).await;
    let names: Vec<&str> = ratings
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_rating_validation_and_lookup() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    let user = token_for(&app, "A", "a@a.com").await;
    create_store(&app, &admin, json!({ "name": "Shop", "email": "s@example.com" })).await;

    let (status, _) = rate(&app, &user, 1, 6).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = rate(&app, &user, 1, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = rate(&app, &user, 77, 3).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Store not found");

    let (status, body) = send(&app, Method::GET, "/api/stores/1/ratings/me", Some(&user), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Rating not found");

    rate(&app, &user, 1, 3).await;
    let (status, body) = send(&app, Method::GET, "/api/stores/1/ratings/me", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating_value"], 3);

    let (status, _) = send(&app, Method::GET, "/api/stores/77/ratings", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_sorting() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    let user = token_for(&app, "A", "a@a.com").await;
    for name in ["Bravo", "Alpha", "Charlie"] {
        create_store(
            &app,
            &admin,
            json!({ "name": name, "email": format!("{}@example.com", name.to_lowercase()) }),
        )
        .await;
    }
    rate(&app, &user, 3, 5).await;
    rate(&app, &user, 1, 2).await;

    let (status, body) = send(&app, Method::GET, "/api/stores?sortBy=name&order=asc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/stores?sortBy=averageRating&order=desc",
        None,
        None,
    )
    .await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [3, 1, 2]);

    for query in ["sortBy=password", "sortBy=name&order=up"] {
        let (status, body) = send(&app, Method::GET, &format!("/api/stores?{query}"), None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid sort parameters");
    }
}

// =============================================================================
// Owner
// =============================================================================

#[tokio::test]
async fn test_owner_dashboard() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    let owner_id = db.seed_user("Owner", "owner@example.com", "owner-pw", UserRole::Owner);
    let owner = login(&app, "owner@example.com", "owner-pw").await;
    let alice = token_for(&app, "Alice", "alice@example.com").await;
    let bob = token_for(&app, "Bob", "bob@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/owner/dashboard", Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "No store found for this owner.");

    create_store(
        &app,
        &admin,
        json!({ "name": "Owned", "email": "o@example.com", "ownerId": owner_id }),
    )
    .await;
    rate(&app, &alice, 1, 3).await;
    rate(&app, &bob, 1, 4).await;

    let (status, body) = send(&app, Method::GET, "/api/owner/dashboard", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Owned");
    assert_eq!(body["averageRating"], "3.50");
    assert_eq!(body["ratingCount"], 2);
    assert_eq!(body["raters"].as_array().unwrap().len(), 2);
    assert!(body["raters"][0]["email"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/owner/stores", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/owner/dashboard", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_routes_forbidden_for_users() {
    let (app, _) = test_app();
    let user = token_for(&app, "A", "a@a.com").await;

    for uri in ["/api/admin/stats", "/api/admin/users", "/api/admin/users/1"] {
        let (status, _) = send(&app, Method::GET, uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_admin_stats() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    let user = token_for(&app, "A", "a@a.com").await;
    create_store(&app, &admin, json!({ "name": "Shop", "email": "s@example.com" })).await;
    rate(&app, &user, 1, 5).await;

    let (status, body) = send(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "userCount": 2, "storeCount": 1, "ratingCount": 1 }));
}

#[tokio::test]
async fn test_admin_user_management() {
    let (app, db) = test_app();
    let admin = admin_token(&app, &db).await;
    token_for(&app, "Zed", "zed@example.com").await;
    token_for(&app, "Amy", "amy@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert!(body[0]["created_at"].is_string());

    let (_, body) = send(&app, Method::GET, "/api/admin/users?sortBy=name", Some(&admin), None).await;
    assert_eq!(body[0]["name"], "Admin");
    assert_eq!(body[1]["name"], "Amy");

    let (status, body) = send(&app, Method::GET, "/api/admin/users/2", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "zed@example.com");

    let (status, body) = send(&app, Method::GET, "/api/admin/users/99", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/users/2",
        Some(&admin),
        Some(json!({ "role": "SUPERUSER" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid role specified");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/users/2",
        Some(&admin),
        Some(json!({ "role": "OWNER" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "OWNER");

    // The role change applies to tokens issued afterwards
    let owner = login(&app, "zed@example.com", "pw").await;
    let (status, _) = send(&app, Method::GET, "/api/owner/stores", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Operational
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["database"]["status"], "healthy");

    let db = Arc::new(InMemory::default());
    let down = create_router(AppState::new(&services(&db), Arc::new(StaticHealth(false))));
    let (status, body) = send(&down, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert!(body["services"]["database"]["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/stores"].is_object());
}
