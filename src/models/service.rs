use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::{OrderedRecord, Record};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub title_cn: String,
    pub title_en: String,
    pub description: String,
    pub icon_name: String,
    pub order_index: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record for Service {
    const TABLE: &'static str = "services";
    const LABEL: &'static str = "Service";
    const WRITABLE: &'static [&'static str] =
        &["title_cn", "title_en", "description", "icon_name"];
    const REQUIRED: &'static [&'static str] = Self::WRITABLE;
}

impl OrderedRecord for Service {}
