// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds in-memory databases, test users, and a full router over temp storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use vita_wellness_server::{
    auth::AuthManager,
    config::{Environment, LogLevel, ServerConfig},
    database::Database,
    media::PhotoStore,
    models::User,
    server::ServerResources,
};

/// JWT secret used by every test auth manager
pub const TEST_JWT_SECRET: &[u8] = b"test-jwt-secret-not-for-production";

/// Fresh in-memory database with migrations applied
pub async fn test_database() -> Database {
    Database::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

/// Auth manager with a fixed secret and 24 hour expiry
pub fn test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_JWT_SECRET.to_vec(), 24)
}

/// Create and persist a user with the given email; password is "correct horse"
pub async fn create_test_user(database: &Database, email: &str) -> User {
    let password_hash = bcrypt::hash("correct horse", bcrypt::DEFAULT_COST)
        .expect("Failed to hash test password");
    let user = User::new(
        email.to_owned(),
        password_hash,
        "Test".into(),
        "User".into(),
    );
    database
        .create_user(&user)
        .await
        .expect("Failed to create test user");
    user
}

/// Full server resources over an in-memory database and a temp uploads dir.
/// The `TempDir` must stay alive for the duration of the test.
pub async fn test_resources() -> (Arc<ServerResources>, TempDir) {
    let uploads = tempfile::tempdir().expect("Failed to create temp uploads dir");
    let database = test_database().await;
    let auth_manager = test_auth_manager();
    let photo_store = PhotoStore::new(uploads.path());
    photo_store
        .ensure_dir()
        .await
        .expect("Failed to create uploads dir");

    let config = ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: TEST_JWT_SECRET.to_vec(),
        jwt_expiry_hours: 24,
        uploads_dir: uploads.path().to_path_buf(),
        cors_origin: None,
        environment: Environment::Testing,
        log_level: LogLevel::Info,
    };

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        photo_store,
        config,
    ));

    (resources, uploads)
}
