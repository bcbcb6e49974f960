// Storage layer: typed stores over one SQLite pool
pub mod admins;
pub mod ordered;
pub mod section;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::FromRow;
use thiserror::Error;

pub use admins::AdminStore;
pub use ordered::{OrderedStore, ReorderEntry};
pub use section::SectionStore;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{what} not found")]
    NotFound { what: &'static str },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidBatch(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A row type stored in one of the content tables.
///
/// `WRITABLE` lists the payload columns the API may set, in table order.
/// Dynamic INSERT/UPDATE statements are built from this allowlist only, so
/// request keys never reach the SQL text. `REQUIRED` is the subset that must
/// be present on create and can never be set to null.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Display name used in client-facing messages ("Case not found").
    const LABEL: &'static str;
    const WRITABLE: &'static [&'static str];
    const REQUIRED: &'static [&'static str];
}

/// Marker for records that live in an ordered collection, i.e. carry
/// `order_index`, `created_at` and `updated_at` columns.
pub trait OrderedRecord: Record {}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>;

/// Bind a JSON value as the matching SQLite type. Arrays and objects are
/// stored as JSON text.
pub(crate) fn bind_value(query: SqliteQuery<'_>, value: Value) -> SqliteQuery<'_> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                query.bind(n.to_string())
            }
        }
        Value::String(s) => query.bind(s),
        other => query.bind(other.to_string()),
    }
}

/// Require the payload to be a JSON object.
pub(crate) fn as_document(payload: Value) -> Result<Map<String, Value>, StoreError> {
    match payload {
        Value::Object(doc) => Ok(doc),
        _ => Err(StoreError::Validation("Expected a JSON object".to_string())),
    }
}

/// Pull the writable columns out of a payload, in `WRITABLE` order.
/// Leftover keys are rejected, as is null for a `REQUIRED` column.
pub(crate) fn take_fields<T: Record>(
    doc: &mut Map<String, Value>,
) -> Result<Vec<(&'static str, Value)>, StoreError> {
    let mut fields = Vec::with_capacity(doc.len());
    for &column in T::WRITABLE {
        if let Some(value) = doc.remove(column) {
            if value.is_null() && T::REQUIRED.contains(&column) {
                return Err(StoreError::Validation(format!(
                    "Field '{}' cannot be null",
                    column
                )));
            }
            fields.push((column, value));
        }
    }
    if let Some(unknown) = doc.keys().next() {
        return Err(StoreError::Validation(format!(
            "Unknown field '{}'",
            unknown
        )));
    }
    Ok(fields)
}

/// Check that every `REQUIRED` column is present (create path).
pub(crate) fn require_fields<T: Record>(
    fields: &[(&'static str, Value)],
) -> Result<(), StoreError> {
    for &column in T::REQUIRED {
        if !fields.iter().any(|(c, _)| *c == column) {
            return Err(StoreError::Validation(format!(
                "Missing required field '{}'",
                column
            )));
        }
    }
    Ok(())
}

/// Pull an optional `order_index` out of a payload. Must be a non-negative
/// integer when present; null counts as absent.
pub(crate) fn take_order_index(doc: &mut Map<String, Value>) -> Result<Option<i64>, StoreError> {
    match doc.remove("order_index") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .filter(|index| *index >= 0)
            .map(Some)
            .ok_or_else(|| {
                StoreError::Validation("order_index must be a non-negative integer".to_string())
            }),
    }
}
