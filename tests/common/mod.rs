//! Shared fixtures for integration tests.
//!
//! `InMemory` stands in for all three repositories so the real services and
//! router can be exercised without PostgreSQL.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use store_rater::api::{create_router, AppState};
use store_rater::config::Config;
use store_rater::domain::{
    NewStore, NewUser, Password, Rater, Rating, Store, StoreRating, StoreRatingSummary,
    StoreWithRating, User, UserRole,
};
use store_rater::errors::{AppError, AppResult};
use store_rater::infra::{HealthCheck, RatingRepository, StoreRepository, UserRepository};
use store_rater::services::Services;
use store_rater::types::{SortOrder, StoreSort, StoreSortColumn, UserSort, UserSortColumn};

pub const TEST_SECRET: &str = "integration-test-secret-with-32-chars";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    stores: Vec<Store>,
    ratings: Vec<Rating>,
}

/// In-memory users, stores and ratings
#[derive(Default)]
pub struct InMemory {
    tables: Mutex<Tables>,
}

impl InMemory {
    /// Insert a user with an explicit role, bypassing registration.
    pub fn seed_user(&self, name: &str, email: &str, password: &str, role: UserRole) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.users.len() as i32 + 1;
        tables.users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            address: None,
            role,
            created_at: Utc::now(),
        });
        id
    }

    fn aggregate(tables: &Tables, store_id: i32) -> (f64, i64) {
        let values: Vec<i32> = tables
            .ratings
            .iter()
            .filter(|r| r.store_id == store_id)
            .map(|r| r.rating_value)
            .collect();
        if values.is_empty() {
            (0.0, 0)
        } else {
            let sum: i32 = values.iter().sum();
            (sum as f64 / values.len() as f64, values.len() as i64)
        }
    }

    fn with_rating(tables: &Tables, store: &Store) -> StoreWithRating {
        let (average_rating, rating_count) = Self::aggregate(tables, store.id);
        StoreWithRating {
            store: store.clone(),
            average_rating,
            rating_count,
        }
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl UserRepository for InMemory {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("User"));
        }
        let created = User {
            id: tables.users.len() as i32 + 1,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            address: user.address,
            role: UserRole::User,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User"))?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn list(&self, sort: UserSort) -> AppResult<Vec<User>> {
        let mut users = self.tables.lock().unwrap().users.clone();
        users.sort_by(|a, b| {
            let ordering = match sort.column {
                UserSortColumn::Id => a.id.cmp(&b.id),
                UserSortColumn::Name => a.name.cmp(&b.name),
                UserSortColumn::Email => a.email.cmp(&b.email),
                UserSortColumn::Role => a.role.as_str().cmp(b.role.as_str()),
                UserSortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            directed(ordering, sort.order).then(a.id.cmp(&b.id))
        });
        Ok(users)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.lock().unwrap().users.len() as u64)
    }
}

#[async_trait]
impl StoreRepository for InMemory {
    async fn list_with_ratings(&self, sort: StoreSort) -> AppResult<Vec<StoreWithRating>> {
        let tables = self.tables.lock().unwrap();
        let mut stores: Vec<StoreWithRating> = tables
            .stores
            .iter()
            .map(|s| Self::with_rating(&tables, s))
            .collect();
        stores.sort_by(|a, b| {
            let ordering = match sort.column {
                StoreSortColumn::Name => a.store.name.cmp(&b.store.name),
                StoreSortColumn::CreatedAt => a.store.created_at.cmp(&b.store.created_at),
                StoreSortColumn::AverageRating => a
                    .average_rating
                    .partial_cmp(&b.average_rating)
                    .unwrap_or(Ordering::Equal),
                StoreSortColumn::RatingCount => a.rating_count.cmp(&b.rating_count),
            };
            directed(ordering, sort.order).then(a.store.id.cmp(&b.store.id))
        });
        Ok(stores)
    }

    async fn find_with_rating(&self, id: i32) -> AppResult<Option<StoreWithRating>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .stores
            .iter()
            .find(|s| s.id == id)
            .map(|s| Self::with_rating(&tables, s)))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().stores.iter().any(|s| s.id == id))
    }

    async fn create(&self, store: NewStore) -> AppResult<Store> {
        let mut tables = self.tables.lock().unwrap();
        let created = Store {
            id: tables.stores.len() as i32 + 1,
            name: store.name,
            email: store.email,
            address: store.address,
            owner_id: store.owner_id,
            created_at: Utc::now(),
        };
        tables.stores.push(created.clone());
        Ok(created)
    }

    async fn summaries_for_owner(&self, owner_id: i32) -> AppResult<Vec<StoreRatingSummary>> {
        let tables = self.tables.lock().unwrap();
        let mut summaries: Vec<StoreRatingSummary> = tables
            .stores
            .iter()
            .filter(|s| s.owner_id == Some(owner_id))
            .map(|s| {
                let (average_rating, rating_count) = Self::aggregate(&tables, s.id);
                StoreRatingSummary {
                    id: s.id,
                    name: s.name.clone(),
                    address: s.address.clone(),
                    average_rating,
                    rating_count,
                }
            })
            .collect();
        summaries.sort_by_key(|s| s.id);
        Ok(summaries)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.lock().unwrap().stores.len() as u64)
    }
}

#[async_trait]
impl RatingRepository for InMemory {
    async fn upsert(&self, store_id: i32, user_id: i32, rating_value: i32) -> AppResult<Rating> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        if let Some(existing) = tables
            .ratings
            .iter_mut()
            .find(|r| r.store_id == store_id && r.user_id == user_id)
        {
            existing.rating_value = rating_value;
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let rating = Rating {
            id: tables.ratings.len() as i32 + 1,
            store_id,
            user_id,
            rating_value,
            created_at: now,
            updated_at: now,
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn find_for_user(&self, store_id: i32, user_id: i32) -> AppResult<Option<Rating>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ratings
            .iter()
            .find(|r| r.store_id == store_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_for_store(&self, store_id: i32) -> AppResult<Vec<StoreRating>> {
        let tables = self.tables.lock().unwrap();
        let mut ratings: Vec<StoreRating> = tables
            .ratings
            .iter()
            .filter(|r| r.store_id == store_id)
            .filter_map(|r| {
                let user = tables.users.iter().find(|u| u.id == r.user_id)?;
                Some(StoreRating {
                    id: r.id,
                    user_id: r.user_id,
                    user_name: user.name.clone(),
                    rating_value: r.rating_value,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(ratings)
    }

    async fn raters_for_store(&self, store_id: i32) -> AppResult<Vec<Rater>> {
        let tables = self.tables.lock().unwrap();
        let mut ratings: Vec<&Rating> = tables
            .ratings
            .iter()
            .filter(|r| r.store_id == store_id)
            .collect();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(ratings
            .into_iter()
            .filter_map(|r| {
                let user = tables.users.iter().find(|u| u.id == r.user_id)?;
                Some(Rater {
                    id: user.id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    rating_value: r.rating_value,
                })
            })
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.lock().unwrap().ratings.len() as u64)
    }
}

/// Health probe with a fixed answer
pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

pub fn test_config() -> Config {
    Config::build(
        "postgres://localhost/store_rater_test".to_string(),
        TEST_SECRET.to_string(),
        1,
        "127.0.0.1".to_string(),
        5000,
    )
    .unwrap()
}

pub fn services(db: &Arc<InMemory>) -> Services {
    Services::from_repositories(db.clone(), db.clone(), db.clone(), test_config())
}

/// Router over a fresh in-memory store, plus a handle for seeding.
pub fn test_app() -> (Router, Arc<InMemory>) {
    let db = Arc::new(InMemory::default());
    let state = AppState::new(&services(&db), Arc::new(StaticHealth(true)));
    (create_router(state), db)
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Send a GET with a raw `Authorization` header value.
pub async fn send_with_authorization(app: &Router, uri: &str, authorization: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Log in through the API and return the token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
