// ABOUTME: Bearer-token authentication shared by all protected route handlers
// ABOUTME: Validates the JWT, resolves the user from the database, and yields an AuthResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Request authentication middleware.
//!
//! Routes pass the `Authorization` header through
//! [`AuthMiddleware::authenticate_request`]; a successful result carries the
//! resolved [`User`] so handlers never re-fetch it.

use crate::auth::{AuthManager, JwtValidationError};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use axum::http::HeaderMap;
use uuid::Uuid;

/// Authentication result with resolved user context
#[derive(Debug)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: Uuid,
    /// The authenticated user's profile
    pub user: User,
}

/// Authentication middleware for bearer tokens
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Database,
}

impl AuthMiddleware {
    /// Create the middleware from the shared auth manager and database
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or not a Bearer token, the
    /// token fails validation, or the token's user no longer exists
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::auth_invalid("Authorization header must use the Bearer scheme")
        })?;

        let claims = self
            .auth_manager
            .validate_token(token)
            .map_err(|e| match &e {
                JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
                JwtValidationError::TokenInvalid { .. } => AppError::auth_invalid(e.to_string()),
                JwtValidationError::TokenMalformed { .. } => AppError::auth_malformed(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;

        let user = self
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::internal(format!("User lookup failed: {e}")))?
            .ok_or_else(|| AppError::auth_invalid("User not found"))?;

        tracing::debug!(user_id = %user_id, "request authenticated");

        Ok(AuthResult { user_id, user })
    }

    /// Authenticate a request from its full header map
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::authenticate_request`]
    pub async fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header).await
    }
}
