use anyhow::{Context, Result};
use serde_json::{json, Value};
use uuid::Uuid;

use hemu_api::config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, ServerConfig, UploadConfig,
};
use hemu_api::state::AppState;
use hemu_api::{bootstrap, db, server};

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Boot a server on an ephemeral port with its own database file and upload
/// directory, fully seeded. Every test gets an isolated instance.
pub async fn spawn_app() -> Result<TestServer> {
    let root = std::env::temp_dir().join(format!("hemu-test-{}", Uuid::new_v4()));
    let config = AppConfig {
        environment: Environment::Development,
        server: ServerConfig {
            // unused: tests bind their own ephemeral listener below
            port: 0,
            assets_path: path_string(&root, "assets"),
        },
        database: DatabaseConfig {
            path: path_string(&root, "hemu.db"),
            max_connections: 5,
            busy_timeout_secs: 5,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 1,
            // low cost keeps registration fast
            bcrypt_cost: 4,
        },
        upload: UploadConfig {
            dir: path_string(&root, "uploads"),
            // small cap so the oversize test stays cheap
            max_file_size: 64 * 1024,
        },
    };

    let pool = db::connect(&config.database).await?;
    bootstrap::init(&pool).await?;

    let state = AppState::new(pool, &config);
    state.images.ensure_dir().await?;
    tokio::fs::create_dir_all(&config.server.assets_path).await?;

    let app = server::app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

/// Register a fresh admin and return its bearer token.
pub async fn admin_token(server: &TestServer) -> Result<String> {
    let username = format!("admin-{}", Uuid::new_v4().simple());
    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "username": username, "password": "hemu-secret" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == reqwest::StatusCode::CREATED,
        "register failed with {}",
        res.status()
    );

    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("register returned no token")?;
    Ok(token.to_string())
}

fn path_string(root: &std::path::Path, leaf: &str) -> String {
    root.join(leaf).to_string_lossy().into_owned()
}
