use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory of pre-bundled site assets, served read-only at /assets/images.
    pub assets_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path. Parent directories are created on first open.
    pub path: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded images are written to, served at /storage/uploads.
    pub dir: String,
    pub max_file_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("ASSETS_PATH") {
            self.server.assets_path = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_BUSY_TIMEOUT_SECS") {
            self.database.busy_timeout_secs = v.parse().unwrap_or(self.database.busy_timeout_secs);
        }

        // Auth overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.auth.token_ttl_hours = v.parse().unwrap_or(self.auth.token_ttl_hours);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.auth.bcrypt_cost = v.parse().unwrap_or(self.auth.bcrypt_cost);
        }

        // Upload overrides
        if let Ok(v) = env::var("UPLOAD_PATH") {
            self.upload.dir = v;
        }
        if let Ok(v) = env::var("MAX_FILE_SIZE") {
            self.upload.max_file_size = v.parse().unwrap_or(self.upload.max_file_size);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3001,
                assets_path: "assets/images".to_string(),
            },
            database: DatabaseConfig {
                path: "database/hemu.db".to_string(),
                max_connections: 5,
                busy_timeout_secs: 5,
            },
            auth: AuthConfig {
                jwt_secret: "default-secret-key".to_string(),
                token_ttl_hours: 24 * 7, // tokens live a week
                bcrypt_cost: 10,
            },
            upload: UploadConfig {
                dir: "storage/uploads".to_string(),
                max_file_size: 5 * 1024 * 1024, // 5MB
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                path: "database/hemu.db".to_string(),
                max_connections: 10,
                busy_timeout_secs: 10,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                path: "database/hemu.db".to_string(),
                max_connections: 20,
                busy_timeout_secs: 30,
            },
            ..Self::development()
        }
    }

    pub fn is_default_secret(&self) -> bool {
        self.auth.jwt_secret == "default-secret-key"
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.path, "database/hemu.db");
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert_eq!(config.upload.max_file_size, 5 * 1024 * 1024);
        assert!(config.is_default_secret());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.max_connections, 20);
        // product knobs stay identical across environments
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.auth.bcrypt_cost, 10);
    }
}
