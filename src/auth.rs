// JWT session tokens and password hashing for the admin API
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::Admin;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token creation failed: {0}")]
    TokenCreation(jsonwebtoken::errors::Error),
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
}

/// Claims carried by an admin session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn generate_token(admin: &Admin, secret: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        id: admin.id,
        username: admin.username.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key).map_err(AuthError::TokenCreation)
}

/// Decode and validate a token. Expiry is checked by the default validation.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|_| AuthError::InvalidToken)?;
    Ok(token_data.claims)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Authenticated admin context, extracted from the Authorization header.
/// Taking this as a handler parameter is what protects a route.
pub struct AuthAdmin(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .filter(|token| !token.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_token(token, &state.auth.jwt_secret)?;
        Ok(AuthAdmin(claims))
    }
}
