//! Authentication service - registration, login, password change and tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::{NewUser, Password, User, UserResponse, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// JWT claims payload.
///
/// `id` and `role` are read directly by clients after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Token plus public user fields, returned by register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Signed JWT
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

/// Input for account creation
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account with role USER and sign a token for it
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse>;

    /// Check credentials and sign a token
    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Replace the password after checking the current one
    async fn update_password(
        &self,
        user_id: i32,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign a token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        id: user.id,
        role: user.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?)
}

fn auth_response(user: User, config: &Config) -> AppResult<AuthResponse> {
    let token = generate_token(&user, config)?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse> {
        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                name: registration.name,
                email: registration.email,
                password_hash,
                address: registration.address,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        auth_response(user, &self.config)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let user = self.users.find_by_email(&email).await?;

        // Verify even for unknown emails so both failures cost the same.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => auth_response(user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn update_password(
        &self,
        user_id: i32,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        if !Password::from_hash(user.password_hash).verify(&current_password) {
            return Err(AppError::validation("Incorrect current password"));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.update_password(user_id, password_hash).await?;

        tracing::info!(user_id, "Password updated");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
