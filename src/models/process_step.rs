use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::{OrderedRecord, Record};

/// One step of the "how we work" process strip. `number` is the display
/// ordinal ("01", "02", ...) and is unrelated to `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProcessStep {
    pub id: i64,
    pub number: String,
    pub title: String,
    pub description: String,
    pub order_index: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record for ProcessStep {
    const TABLE: &'static str = "process_steps";
    const LABEL: &'static str = "Process step";
    const WRITABLE: &'static [&'static str] = &["number", "title", "description"];
    const REQUIRED: &'static [&'static str] = Self::WRITABLE;
}

impl OrderedRecord for ProcessStep {}
