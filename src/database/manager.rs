use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager and the persistence operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens the SQLite pool and owns schema setup.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a connection pool for the configured database, creating the file
    /// if it does not exist yet.
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let url = Self::normalize_url(&config.url);

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DatabaseError::InvalidUrl(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!("Opened database pool for: {}", url);
        Ok(pool)
    }

    /// One-time schema setup, run before the server starts accepting
    /// connections. Statements are idempotent, so re-running on an existing
    /// database is safe.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::raw_sql(include_str!("../../migrations/001_init.sql"))
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Accept both `sqlite:...` URLs and bare file paths.
    fn normalize_url(raw: &str) -> String {
        if raw.starts_with("sqlite:") {
            raw.to_string()
        } else {
            format!("sqlite:{raw}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_keeps_sqlite_urls() {
        assert_eq!(
            DatabaseManager::normalize_url("sqlite://filmlist.db"),
            "sqlite://filmlist.db"
        );
        assert_eq!(
            DatabaseManager::normalize_url("sqlite::memory:"),
            "sqlite::memory:"
        );
    }

    #[test]
    fn normalize_url_prefixes_bare_paths() {
        assert_eq!(
            DatabaseManager::normalize_url("data/filmlist.db"),
            "sqlite:data/filmlist.db"
        );
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = DatabaseManager::connect(&config).await.unwrap();
        DatabaseManager::migrate(&pool).await.unwrap();
        DatabaseManager::migrate(&pool).await.unwrap();
        DatabaseManager::health_check(&pool).await.unwrap();
    }
}
