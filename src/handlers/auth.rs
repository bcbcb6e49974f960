// Login and admin registration
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::{self, AuthError};
use crate::error::ApiError;
use crate::models::Admin;
use crate::state::AppState;

fn credentials(body: &Value) -> Result<(&str, &str), ApiError> {
    let username = body.get("username").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(ApiError::bad_request("Username and password are required")),
    }
}

fn session_response(token: String, admin: &Admin) -> Value {
    json!({
        "token": token,
        "admin": { "id": admin.id, "username": admin.username }
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let (username, password) = credentials(&body)?;

    let admin = state
        .admins
        .find_by_username(username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    if !auth::verify_password(password, &admin.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = auth::generate_token(&admin, &state.auth.jwt_secret, state.auth.token_ttl_hours)?;
    tracing::info!("Admin {} logged in", admin.username);
    Ok(Json(session_response(token, &admin)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (username, password) = credentials(&body)?;
    if password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let password_hash = auth::hash_password(password, state.auth.bcrypt_cost)?;
    let admin = state.admins.create(username, &password_hash).await?;

    let token = auth::generate_token(&admin, &state.auth.jwt_secret, state.auth.token_ttl_hours)?;
    tracing::info!("Admin {} registered", admin.username);
    Ok((StatusCode::CREATED, Json(session_response(token, &admin))))
}
