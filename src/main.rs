use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hemu_api::store::AdminStore;
use hemu_api::{auth, bootstrap, config, db, server};

#[derive(Parser)]
#[command(name = "hemu-api")]
#[command(about = "Content management backend for the Hemu marketing site")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Start the HTTP server (default)")]
    Serve,

    #[command(about = "Create tables, run migrations and seed default content")]
    InitDb,

    #[command(about = "Create an admin account")]
    CreateAdmin {
        username: String,
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::config();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run(config).await,
        Command::InitDb => {
            let pool = db::connect(&config.database).await?;
            bootstrap::init(&pool).await?;
            println!("Database ready at {}", config.database.path);
            Ok(())
        }
        Command::CreateAdmin { username, password } => {
            if password.len() < 6 {
                anyhow::bail!("Password must be at least 6 characters");
            }

            let pool = db::connect(&config.database).await?;
            bootstrap::init(&pool).await?;

            let password_hash = auth::hash_password(&password, config.auth.bcrypt_cost)?;
            let admin = AdminStore::new(pool).create(&username, &password_hash).await?;
            println!("Created admin {} (id {})", admin.username, admin.id);
            Ok(())
        }
    }
}
