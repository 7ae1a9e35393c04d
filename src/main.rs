use anyhow::Context;
use clap::{Parser, Subcommand};

use userstore::{
    config::AppConfig,
    db,
    users::{services, UserRepository, UserStore},
};

/// Manage stored user credentials
#[derive(Parser)]
#[command(name = "userstore")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every stored user as JSON
    List,

    /// Create a user with a hashed password
    Add { username: String, password: String },

    /// Check a username/password pair
    Check { username: String, password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userstore=debug,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();

    let config = AppConfig::from_env().context("load config")?;
    let pool = db::connect(&config).await?;
    db::migrate(&pool).await.context("run migrations")?;

    let repo = UserRepository::new(pool.clone());
    let result = run(cli.command, &repo).await;
    pool.close().await;
    result
}

async fn run(command: Command, store: &dyn UserStore) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let users = store.find_all().await?;
            if users.is_empty() {
                tracing::info!("no users stored");
            }
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Add { username, password } => {
            let id = services::register(store, &username, &password).await?;
            println!("{id}");
        }
        Command::Check { username, password } => {
            match services::authenticate(store, &username, &password).await? {
                Some(user) => println!("ok: {} (id {})", user.username, user.id),
                None => anyhow::bail!("invalid credentials"),
            }
        }
    }
    Ok(())
}
