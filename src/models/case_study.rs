use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::{OrderedRecord, Record};

/// Portfolio case. `gallery_images` holds a JSON-encoded string array;
/// the API treats it as opaque text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseStudy {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub image: String,
    pub location: String,
    pub year: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub gallery_images: Option<String>,
    pub order_index: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record for CaseStudy {
    const TABLE: &'static str = "cases";
    const LABEL: &'static str = "Case";
    const WRITABLE: &'static [&'static str] = &[
        "title",
        "category",
        "image",
        "location",
        "year",
        "description",
        "content",
        "gallery_images",
    ];
    const REQUIRED: &'static [&'static str] = &["title", "category", "image", "location", "year"];
}

impl OrderedRecord for CaseStudy {}
