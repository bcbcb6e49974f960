// HTTP handlers, grouped by route family
pub mod auth;
pub mod collection;
pub mod media;
pub mod section;
