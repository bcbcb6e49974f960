use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hero {
    pub id: i64,
    pub background_image: String,
    pub title_cn: String,
    pub title_en: String,
    pub subtitle_cn: String,
    pub subtitle_en: String,
    pub cta_text_cn: String,
    pub cta_text_en: String,
    pub updated_at: NaiveDateTime,
}

impl Record for Hero {
    const TABLE: &'static str = "hero";
    const LABEL: &'static str = "Hero section";
    const WRITABLE: &'static [&'static str] = &[
        "background_image",
        "title_cn",
        "title_en",
        "subtitle_cn",
        "subtitle_en",
        "cta_text_cn",
        "cta_text_en",
    ];
    const REQUIRED: &'static [&'static str] = Self::WRITABLE;
}
