use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct About {
    pub id: i64,
    pub image: String,
    pub title_cn: String,
    pub subtitle_cn: String,
    pub description_cn: String,
    pub description2_cn: String,
    pub projects_count: i64,
    pub partners_count: i64,
    pub updated_at: NaiveDateTime,
}

impl Record for About {
    const TABLE: &'static str = "about";
    const LABEL: &'static str = "About section";
    const WRITABLE: &'static [&'static str] = &[
        "image",
        "title_cn",
        "subtitle_cn",
        "description_cn",
        "description2_cn",
        "projects_count",
        "partners_count",
    ];
    const REQUIRED: &'static [&'static str] = Self::WRITABLE;
}
