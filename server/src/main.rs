use std::sync::Arc;

use anyhow::Result;
use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use entity::user;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, PaginatorTrait};
use tracing::info;
use uuid::Uuid;

use server::{
    config::AppConfig,
    http::{self, AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "crm-server", version, about = "CRM Financeiro")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Create the demo login when the user table is empty.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 3000)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let db = setup_pool().await?;
    ensure_migrations(&db, cmd.allow_dirty).await?;
    let cookie_key = config.cookie_key.clone();
    let state = AppState {
        db,
        config,
        cookie_key,
    };
    http::serve((&cmd).into(), state).await
}

async fn ensure_migrations(db: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `cargo run -p server -- migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let db = setup_pool().await?;
    Migrator::up(&db, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let db = setup_pool().await?;
    Migrator::down(&db, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed() -> Result<()> {
    let db = setup_pool().await?;
    let existing = user::Entity::find().count(&db).await?;
    if existing > 0 {
        info!(users = existing, "user table already populated; nothing to seed");
        return Ok(());
    }
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(b"demo1234", &salt)
        .map_err(|err| anyhow::anyhow!("password hash: {err}"))?
        .to_string();
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set("demo".into()),
        password_hash: Set(password_hash),
        name: Set("Assessor Demo".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;
    info!("seeded demo user (username: demo)");
    Ok(())
}
