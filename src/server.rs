// ABOUTME: Shared server resources, router assembly, and HTTP serving loop
// ABOUTME: Wires database, auth, photo store, and config into the axum application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Server assembly.
//!
//! [`ServerResources`] is the single shared-state bundle handed to every route
//! via `Arc`; [`WellnessServer`] builds the router, applies the middleware
//! stack, and serves until Ctrl+C or SIGTERM.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::constants::limits::MAX_UPLOAD_BYTES;
use crate::database::Database;
use crate::media::PhotoStore;
use crate::middleware::AuthMiddleware;
use crate::routes::{AuthRoutes, HabitRoutes, HealthRoutes, ProgressRoutes, WorkoutRoutes};
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared resources handed to every route handler
pub struct ServerResources {
    /// Database pool
    pub database: Database,
    /// JWT issuance and validation
    pub auth_manager: AuthManager,
    /// Bearer-token authentication middleware
    pub auth_middleware: AuthMiddleware,
    /// Progress photo storage
    pub photo_store: PhotoStore,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the shared resources; the auth middleware is derived from the
    /// auth manager and database handed in
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        photo_store: PhotoStore,
        config: ServerConfig,
    ) -> Self {
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());
        Self {
            database,
            auth_manager,
            auth_middleware,
            photo_store,
            config,
        }
    }
}

/// The HTTP server
pub struct WellnessServer {
    resources: Arc<ServerResources>,
}

impl WellnessServer {
    /// Create the server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full application router
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        let uploads_dir = resources.photo_store.root().to_path_buf();
        let cors = cors_layer(&resources.config);

        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(HabitRoutes::routes(resources.clone()))
            .merge(WorkoutRoutes::routes(resources.clone()))
            .merge(ProgressRoutes::routes(resources))
            .nest_service("/uploads", ServeDir::new(uploads_dir))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
    }

    /// Bind and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the uploads directory cannot be created, the
    /// listener cannot bind, or the server loop fails
    pub async fn run(&self) -> Result<()> {
        self.resources.photo_store.ensure_dir().await?;

        let router = Self::router(self.resources.clone());
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("HTTP server listening on {addr}");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");

        Ok(())
    }
}

/// CORS policy: a configured origin is enforced; without one, any origin is
/// allowed (development mode)
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    config.cors_origin.as_ref().map_or_else(
        CorsLayer::permissive,
        |origin| match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!("Invalid CORS_ORIGIN value {origin:?}; falling back to permissive CORS");
                CorsLayer::permissive()
            }
        },
    )
}

/// Resolve when Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
