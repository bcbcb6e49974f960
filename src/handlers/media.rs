// Multipart image uploads for the hero, about and case editors
use axum::extract::{Multipart, Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::AuthAdmin;
use crate::error::ApiError;
use crate::state::AppState;
use crate::upload;

pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    store_image(&state, multipart).await
}

/// The case id in the path is accepted for URL compatibility only; the
/// client links the returned URL to the case in a follow-up update.
pub async fn upload_case_image(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    store_image(&state, multipart).await
}

async fn store_image(state: &AppState, mut multipart: Multipart) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart request"))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("Malformed multipart request"))?;

        let name = state
            .images
            .save(file_name.as_deref(), &content_type, &data)
            .await?;
        return Ok(Json(json!({
            "imageUrl": format!("{}/{}", upload::PUBLIC_ROUTE, name)
        })));
    }

    Err(ApiError::bad_request("No image uploaded"))
}
