// ABOUTME: Unit tests for auth functionality
// ABOUTME: Validates token round-trips, failure taxonomy, and middleware behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use vita_wellness_server::{
    auth::{AuthManager, JwtValidationError},
    errors::ErrorCode,
    middleware::AuthMiddleware,
    models::User,
};

fn create_test_user() -> User {
    User::new(
        "test@example.com".into(),
        "hashed_password_123".into(),
        "Test".into(),
        "User".into(),
    )
}

#[test]
fn test_generate_and_validate_token() {
    let auth_manager = common::test_auth_manager();
    let user = create_test_user();

    let token = auth_manager.generate_token(&user).unwrap();
    assert!(!token.is_empty());

    let claims = auth_manager.validate_token(&token).unwrap();
    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.sub, user.id.to_string());
    assert!(claims.exp > Utc::now().timestamp());
}

#[test]
fn test_expired_token_is_reported_as_expired() {
    // Negative expiry issues tokens that are already two hours stale,
    // comfortably past the validator's leeway.
    let issuing_manager = AuthManager::new(common::TEST_JWT_SECRET.to_vec(), -2);
    let validating_manager = common::test_auth_manager();
    let user = create_test_user();

    let token = issuing_manager.generate_token(&user).unwrap();
    let err = validating_manager.validate_token(&token).unwrap_err();

    assert!(matches!(err, JwtValidationError::TokenExpired { .. }));
    assert!(err.to_string().contains("expired"));
}

#[test]
fn test_wrong_secret_is_reported_as_invalid() {
    let other_manager = AuthManager::new(b"a-completely-different-secret".to_vec(), 24);
    let validating_manager = common::test_auth_manager();
    let user = create_test_user();

    let token = other_manager.generate_token(&user).unwrap();
    let err = validating_manager.validate_token(&token).unwrap_err();

    assert!(matches!(err, JwtValidationError::TokenInvalid { .. }));
}

#[test]
fn test_garbage_token_is_reported_as_malformed() {
    let auth_manager = common::test_auth_manager();

    let err = auth_manager.validate_token("invalid.jwt.token").unwrap_err();

    assert!(matches!(err, JwtValidationError::TokenMalformed { .. }));
}

#[tokio::test]
async fn test_middleware_authenticates_bearer_token() {
    let database = common::test_database().await;
    let auth_manager = common::test_auth_manager();
    let user = common::create_test_user(&database, "bearer@example.com").await;

    let token = auth_manager.generate_token(&user).unwrap();
    let middleware = AuthMiddleware::new(auth_manager, database);

    let result = middleware
        .authenticate_request(Some(&format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(result.user_id, user.id);
    assert_eq!(result.user.email, "bearer@example.com");
}

#[tokio::test]
async fn test_middleware_rejects_missing_header() {
    let database = common::test_database().await;
    let middleware = AuthMiddleware::new(common::test_auth_manager(), database);

    let err = middleware.authenticate_request(None).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_middleware_rejects_non_bearer_scheme() {
    let database = common::test_database().await;
    let middleware = AuthMiddleware::new(common::test_auth_manager(), database);

    let err = middleware
        .authenticate_request(Some("Basic dXNlcjpwYXNz"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_middleware_rejects_token_for_deleted_user() {
    let database = common::test_database().await;
    let auth_manager = common::test_auth_manager();

    // Token for a user that was never persisted.
    let ghost = create_test_user();
    let token = auth_manager.generate_token(&ghost).unwrap();

    let middleware = AuthMiddleware::new(auth_manager, database);
    let err = middleware
        .authenticate_request(Some(&format!("Bearer {token}")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthInvalid);
}
