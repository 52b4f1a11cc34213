// ABOUTME: SQLite database management: connection pool, migrations, and CRUD modules
// ABOUTME: Stores users, habit check-ins, workout sessions, and weekly progress entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! # Database Management
//!
//! SQLite-backed persistence for the Vita Wellness Server. Each domain's
//! operations live in their own module as `impl Database` blocks; migrations
//! are plain `CREATE TABLE IF NOT EXISTS` statements run at startup.

mod habits;
mod progress;
mod users;
mod workouts;

use anyhow::{anyhow, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use uuid::Uuid;

/// Database manager for all persisted application data
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection pool and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        // A :memory: database exists per connection; the pool must hold one
        // connection open for its whole lifetime or the schema vanishes.
        let pool = if connection_options.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_options)
                .await?
        } else {
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_habits().await?;
        self.migrate_workouts().await?;
        self.migrate_progress().await?;

        Ok(())
    }
}

/// Parse a TEXT primary key column back into a [`Uuid`]
fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| anyhow!("Invalid UUID in database: {e}"))
}
