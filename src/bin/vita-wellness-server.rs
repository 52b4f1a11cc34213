// ABOUTME: Server binary: loads configuration, wires resources, and serves HTTP
// ABOUTME: Production entrypoint with environment-based configuration and CLI overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! # Vita Wellness Server Binary
//!
//! Starts the wellness-tracking REST API with user authentication, habit
//! statistics, workout logging, and progress photo storage.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use vita_wellness_server::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    logging,
    media::PhotoStore,
    server::{ServerResources, WellnessServer},
};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "vita-wellness-server")]
#[command(about = "Vita Wellness API - habit, workout and progress tracking backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Vita Wellness Server");
    info!("{}", config.summary());

    // Initialize database and run migrations
    let database = Database::new(&config.database_url).await?;
    info!("Database initialized successfully");

    // Initialize authentication manager
    let auth_manager = AuthManager::new(config.jwt_secret.clone(), config.jwt_expiry_hours);
    info!(
        "Authentication manager initialized (token expiry: {} hours)",
        auth_manager.token_expiry_hours()
    );

    // Initialize photo storage
    let photo_store = PhotoStore::new(config.uploads_dir.clone());

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        photo_store,
        config,
    ));

    WellnessServer::new(resources).run().await
}
