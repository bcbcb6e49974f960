// Router assembly and server startup
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post, put};
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, Environment};
use crate::handlers::{auth, collection, media, section};
use crate::models::{About, CaseStudy, Hero, ProcessStep, Service};
use crate::state::AppState;
use crate::{bootstrap, db, upload};

pub fn app(state: AppState) -> Router {
    // multipart framing adds overhead on top of the image size cap
    let body_limit = state.images.max_file_size() + 1024 * 1024;

    Router::new()
        .route("/health", get(health))
        .merge(section_routes())
        .merge(collection_routes())
        .merge(auth_routes())
        .nest_service(upload::PUBLIC_ROUTE, ServeDir::new(state.images.dir()))
        .nest_service("/assets/images", ServeDir::new(&state.assets_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn section_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/hero",
            get(section::get::<Hero>).put(section::update::<Hero>),
        )
        .route("/api/hero/image", post(media::upload_image))
        .route(
            "/api/about",
            get(section::get::<About>).put(section::update::<About>),
        )
        .route("/api/about/image", post(media::upload_image))
}

fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/services",
            get(collection::list::<Service>).post(collection::create::<Service>),
        )
        .route("/api/services/reorder", put(collection::reorder::<Service>))
        .route(
            "/api/services/:id",
            get(collection::get_by_id::<Service>)
                .put(collection::update::<Service>)
                .delete(collection::remove::<Service>),
        )
        .route(
            "/api/process",
            get(collection::list::<ProcessStep>).post(collection::create::<ProcessStep>),
        )
        .route(
            "/api/process/reorder",
            put(collection::reorder::<ProcessStep>),
        )
        .route(
            "/api/process/:id",
            get(collection::get_by_id::<ProcessStep>)
                .put(collection::update::<ProcessStep>)
                .delete(collection::remove::<ProcessStep>),
        )
        .route(
            "/api/cases",
            get(collection::list::<CaseStudy>).post(collection::create::<CaseStudy>),
        )
        .route("/api/cases/reorder", put(collection::reorder::<CaseStudy>))
        .route(
            "/api/cases/:id",
            get(collection::get_by_id::<CaseStudy>)
                .put(collection::update::<CaseStudy>)
                .delete(collection::remove::<CaseStudy>),
        )
        .route("/api/cases/:id/image", post(media::upload_case_image))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match db::ping(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "connected"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database": e.to_string()
            })),
        ),
    }
}

/// Connect, prepare the database, then serve until the process is stopped.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let pool = db::connect(&config.database).await?;
    bootstrap::init(&pool).await?;

    let state = AppState::new(pool, config);
    state.images.ensure_dir().await?;

    if config.environment == Environment::Production && config.is_default_secret() {
        tracing::warn!("JWT_SECRET is not set; tokens are signed with the built-in development secret");
    }

    let app = app(state);
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Hemu API listening on http://{}", bind_addr);
    tracing::info!(
        "API endpoint: http://localhost:{}/api",
        config.server.port
    );
    tracing::info!(
        "Health check: http://localhost:{}/health",
        config.server.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}
