// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config, limits};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything, including per-request noise
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete server configuration read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// JWT signing secret bytes
    pub jwt_secret: Vec<u8>,
    /// JWT lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Directory where progress photos are stored
    pub uploads_dir: PathBuf,
    /// Allowed CORS origin; `None` permits any origin (development)
    pub cors_origin: Option<String>,
    /// Deployment environment
    pub environment: Environment,
    /// Base log level
    pub log_level: LogLevel,
}

impl ServerConfig {
    /// Load configuration from environment variables, applying defaults for
    /// anything unset
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed (e.g. a
    /// non-numeric port)
    pub fn from_env() -> Result<Self> {
        let http_port = env::var(env_config::HTTP_PORT).map_or(Ok(defaults::HTTP_PORT), |port| {
            port.parse::<u16>()
                .with_context(|| format!("Invalid {}: {port}", env_config::HTTP_PORT))
        })?;

        let database_url =
            env::var(env_config::DATABASE_URL).unwrap_or_else(|_| defaults::DATABASE_URL.into());

        let jwt_secret = env::var(env_config::JWT_SECRET).map_or_else(
            |_| {
                warn!(
                    "{} not set; generating an ephemeral secret (tokens will not survive restarts)",
                    env_config::JWT_SECRET
                );
                crate::auth::generate_jwt_secret()
            },
            |secret| secret,
        );

        let uploads_dir = env::var(env_config::UPLOADS_DIR)
            .map_or_else(|_| PathBuf::from(defaults::UPLOADS_DIR), PathBuf::from);

        let cors_origin = env::var(env_config::CORS_ORIGIN).ok();

        let environment = Environment::from_str_or_default(
            &env::var(env_config::ENVIRONMENT).unwrap_or_default(),
        );

        let log_level =
            LogLevel::from_str_or_default(&env::var("RUST_LOG").unwrap_or_default());

        Ok(Self {
            http_port,
            database_url,
            jwt_secret: jwt_secret.into_bytes(),
            jwt_expiry_hours: limits::JWT_EXPIRY_HOURS,
            uploads_dir,
            cors_origin,
            environment,
            log_level,
        })
    }

    /// One-line configuration summary for startup logging (secrets omitted)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} db={} uploads={} env={} log={}",
            self.http_port,
            self.database_url,
            self.uploads_dir.display(),
            self.environment,
            self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_known_values() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default(""), Environment::Development);
    }
}
