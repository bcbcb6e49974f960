// Handlers for the hero and about singleton sections
use axum::extract::State;
use axum::response::Json;
use serde_json::Value;

use crate::auth::AuthAdmin;
use crate::error::ApiError;
use crate::state::{AppState, SectionState};
use crate::store::{Record, SectionStore};

pub async fn get<T>(State(state): State<AppState>) -> Result<Json<T>, ApiError>
where
    T: Record,
    AppState: SectionState<T>,
{
    let store: &SectionStore<T> = state.section();
    Ok(Json(store.get().await?))
}

pub async fn update<T>(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Json(patch): Json<Value>,
) -> Result<Json<T>, ApiError>
where
    T: Record,
    AppState: SectionState<T>,
{
    let store: &SectionStore<T> = state.section();
    Ok(Json(store.update(patch).await?))
}
