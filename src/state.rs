// Shared application state handed to every handler
use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::config::{AppConfig, AuthConfig};
use crate::models::{About, CaseStudy, Hero, ProcessStep, Service};
use crate::store::{AdminStore, OrderedRecord, OrderedStore, Record, SectionStore};
use crate::upload::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub hero: SectionStore<Hero>,
    pub about: SectionStore<About>,
    pub services: OrderedStore<Service>,
    pub process_steps: OrderedStore<ProcessStep>,
    pub cases: OrderedStore<CaseStudy>,
    pub admins: AdminStore,
    pub images: ImageStore,
    pub auth: AuthConfig,
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            hero: SectionStore::new(pool.clone()),
            about: SectionStore::new(pool.clone()),
            services: OrderedStore::new(pool.clone()),
            process_steps: OrderedStore::new(pool.clone()),
            cases: OrderedStore::new(pool.clone()),
            admins: AdminStore::new(pool.clone()),
            images: ImageStore::new(&config.upload),
            auth: config.auth.clone(),
            assets_dir: PathBuf::from(&config.server.assets_path),
            db: pool,
        }
    }
}

/// Maps an ordered entity type to its store, so one set of generic handlers
/// can serve every collection route.
pub trait CollectionState<T: OrderedRecord> {
    fn collection(&self) -> &OrderedStore<T>;
}

impl CollectionState<Service> for AppState {
    fn collection(&self) -> &OrderedStore<Service> {
        &self.services
    }
}

impl CollectionState<ProcessStep> for AppState {
    fn collection(&self) -> &OrderedStore<ProcessStep> {
        &self.process_steps
    }
}

impl CollectionState<CaseStudy> for AppState {
    fn collection(&self) -> &OrderedStore<CaseStudy> {
        &self.cases
    }
}

/// Same mapping for the singleton page sections.
pub trait SectionState<T: Record> {
    fn section(&self) -> &SectionStore<T>;
}

impl SectionState<Hero> for AppState {
    fn section(&self) -> &SectionStore<Hero> {
        &self.hero
    }
}

impl SectionState<About> for AppState {
    fn section(&self) -> &SectionStore<About> {
        &self.about
    }
}
