// ABOUTME: User authentication route handlers for registration, login, and profile
// ABOUTME: Thin REST wrappers delegating business logic to the AuthService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Authentication routes for user account management.
//!
//! Registration and login both answer with a profile plus a fresh JWT; the
//! `me` endpoint echoes the authenticated profile back to the client.

use crate::constants::limits::MIN_PASSWORD_LENGTH;
use crate::errors::AppError;
use crate::models::User;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address, unique per account
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Response for successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The account profile (password hash omitted)
    pub user: User,
    /// Bearer token for subsequent requests
    pub token: String,
    /// Token expiry as RFC 3339
    pub expires_at: String,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the email is taken, or a
    /// database operation fails
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(AppError::missing_field("first_name / last_name"));
        }

        if self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::internal(format!("User lookup failed: {e}")))?
            .is_some()
        {
            return Err(AppError::already_exists(
                "User with this email already exists",
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let user = User::new(
            request.email.clone(),
            password_hash,
            request.first_name.trim().to_owned(),
            request.last_name.trim().to_owned(),
        );

        let user_id = self
            .resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::internal(format!("User creation failed: {e}")))?;

        tracing::info!("User registered successfully: {} ({user_id})", request.email);

        self.session_response(user)
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or token generation fails
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::internal(format!("User lookup failed: {e}")))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        // Verify password on a blocking thread to avoid stalling the executor
        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        self.session_response(user)
    }

    fn session_response(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = self
            .resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

        Ok(AuthResponse {
            user,
            token,
            expires_at: self.resources.auth_manager.token_expiry().to_rfc3339(),
        })
    }

    fn is_valid_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle registration request
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.register(request).await?;

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle login request
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.login(request).await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle authenticated profile request
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        Ok((StatusCode::OK, Json(auth.user)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(AuthService::is_valid_email("ada@example.com"));
        assert!(!AuthService::is_valid_email("ada"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("ada@nodot"));
    }
}
