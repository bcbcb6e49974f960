// Generic handlers shared by the services, process steps and cases routes
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::AuthAdmin;
use crate::error::ApiError;
use crate::state::{AppState, CollectionState};
use crate::store::{OrderedRecord, OrderedStore, ReorderEntry};

pub async fn list<T>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let store: &OrderedStore<T> = state.collection();
    Ok(Json(store.list_all().await?))
}

pub async fn get_by_id<T>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<T>, ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let store: &OrderedStore<T> = state.collection();
    Ok(Json(store.get_by_id(id).await?))
}

pub async fn create<T>(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let store: &OrderedStore<T> = state.collection();
    let row = store.create(payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update<T>(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Result<Json<T>, ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let store: &OrderedStore<T> = state.collection();
    Ok(Json(store.update(id, patch).await?))
}

pub async fn remove<T>(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let store: &OrderedStore<T> = state.collection();
    if store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("{} not found", T::LABEL)))
    }
}

/// Applies a batch of `{id, order_index}` assignments atomically. The body
/// is parsed by hand so a malformed batch reports 400 rather than a generic
/// extractor rejection.
pub async fn reorder<T>(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError>
where
    T: OrderedRecord,
    AppState: CollectionState<T>,
{
    let orders = body
        .get("orders")
        .cloned()
        .ok_or_else(invalid_orders)?;
    let batch: Vec<ReorderEntry> = serde_json::from_value(orders).map_err(|_| invalid_orders())?;

    let store: &OrderedStore<T> = state.collection();
    store.reorder(&batch).await?;
    Ok(Json(json!({ "success": true })))
}

fn invalid_orders() -> ApiError {
    ApiError::bad_request("orders must be an array of {id, order_index} pairs")
}
