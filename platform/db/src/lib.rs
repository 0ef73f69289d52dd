//! Database settings and pool construction for the CRM server.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use thiserror::Error;

/// Shared connection handle. SeaORM's `DatabaseConnection` is internally a
/// pool; clones share it.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] sea_orm::DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.url = std::env::var("DATABASE_URL").ok();
        if let Some(max) = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            settings.max_connections = max;
        }
        settings
    }

    pub fn database_url(&self) -> DbResult<&str> {
        self.url.as_deref().ok_or(DbError::MissingUrl)
    }
}

/// Open a pooled connection with the configured limits.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .sqlx_logging(false);
    let pool = Database::connect(options).await?;
    tracing::debug!(max_connections = settings.max_connections, "database pool ready");
    Ok(pool)
}
