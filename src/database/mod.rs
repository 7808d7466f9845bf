// file: src/database/mod.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use std::path::Path;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::preferences::PreferenceStore;
use crate::utils::logging;

// Declare submodules
pub mod preferences;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", path.display());

        // Create database if it doesn't exist
        let db_exists = Sqlite::database_exists(&db_url)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating preference database at {}", path.display());
            Sqlite::create_database(&db_url)
                .await
                .context("Failed to create database")?;
        }

        // Connect to database
        let pool = SqlitePool::connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await.context("Failed to run database schema")?;

        info!("Database initialized successfully");

        Ok(Database { pool })
    }

    // --- Preference Delegates ---

    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let started = Instant::now();
        let value = preferences::get(&self.pool, key).await?;
        logging::log_database_operation("SELECT", "preferences", started.elapsed().as_millis() as u64);
        Ok(value)
    }

    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        let started = Instant::now();
        preferences::set(&self.pool, key, value).await?;
        logging::log_database_operation("UPSERT", "preferences", started.elapsed().as_millis() as u64);
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for Database {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.get_preference(key)
            .await
            .map_err(|e| AppError::preference(format!("Failed to read '{}': {:#}", key, e)))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        debug!("Writing preference '{}'", key);
        self.set_preference(key, value)
            .await
            .map_err(|e| AppError::preference(format!("Failed to write '{}': {:#}", key, e)))
    }
}

pub(crate) async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();

    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_CALENDAR_KEY, HIDDEN_CALENDARS_KEY};
    use tempfile::TempDir;

    async fn create_test_database() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(&dir.path().join("nested").join("prefs.db")).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn test_database_new() {
        let (db, _dir) = create_test_database().await;
        assert!(!db.pool.is_closed());
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (db, _dir) = create_test_database().await;
        assert_eq!(db.get_preference(DEFAULT_CALENDAR_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let (db, _dir) = create_test_database().await;

        db.set_preference(DEFAULT_CALENDAR_KEY, "cal_A").await.unwrap();
        db.set_preference(DEFAULT_CALENDAR_KEY, "cal_B").await.unwrap();

        assert_eq!(
            db.get_preference(DEFAULT_CALENDAR_KEY).await.unwrap().as_deref(),
            Some("cal_B")
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (db, _dir) = create_test_database().await;
        let store: &dyn PreferenceStore = &db;

        store.set(HIDDEN_CALENDARS_KEY, r#"["x"]"#).await.unwrap();
        store.set(DEFAULT_CALENDAR_KEY, "primary").await.unwrap();

        assert_eq!(store.get(HIDDEN_CALENDARS_KEY).await.unwrap().as_deref(), Some(r#"["x"]"#));
        assert_eq!(store.get(DEFAULT_CALENDAR_KEY).await.unwrap().as_deref(), Some("primary"));
    }

    #[tokio::test]
    async fn test_store_failures_are_preference_errors() {
        let (db, _dir) = create_test_database().await;
        db.pool.close().await;

        let store: &dyn PreferenceStore = &db;
        assert!(matches!(store.get(DEFAULT_CALENDAR_KEY).await, Err(AppError::Preference(_))));
        assert!(matches!(store.set(DEFAULT_CALENDAR_KEY, "cal_A").await, Err(AppError::Preference(_))));
    }

    #[tokio::test]
    async fn test_reopen_keeps_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.db");

        let db = Database::new(&path).await.unwrap();
        db.set_preference(DEFAULT_CALENDAR_KEY, "cal_A").await.unwrap();
        db.pool.close().await;

        let reopened = Database::new(&path).await.unwrap();
        assert_eq!(
            reopened.get_preference(DEFAULT_CALENDAR_KEY).await.unwrap().as_deref(),
            Some("cal_A")
        );
    }
}
