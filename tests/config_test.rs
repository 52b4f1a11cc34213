// ABOUTME: Tests for environment-based server configuration
// ABOUTME: Runs serially because the cases mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use vita_wellness_server::config::{Environment, ServerConfig};

const CONFIG_VARS: &[&str] = &[
    "HTTP_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "UPLOADS_DIR",
    "CORS_ORIGIN",
    "ENVIRONMENT",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_apply_when_env_is_empty() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 5000);
    assert_eq!(config.database_url, "sqlite:./vita.db");
    assert_eq!(config.environment, Environment::Development);
    assert!(config.cors_origin.is_none());
    // A secret is generated when none is configured.
    assert!(!config.jwt_secret.is_empty());
}

#[test]
#[serial]
fn test_environment_overrides_are_honored() {
    clear_config_env();
    env::set_var("HTTP_PORT", "8080");
    env::set_var("DATABASE_URL", "sqlite:./test.db");
    env::set_var("JWT_SECRET", "configured-secret");
    env::set_var("CORS_ORIGIN", "https://app.example.com");
    env::set_var("ENVIRONMENT", "production");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.database_url, "sqlite:./test.db");
    assert_eq!(config.jwt_secret, b"configured-secret".to_vec());
    assert_eq!(config.cors_origin.as_deref(), Some("https://app.example.com"));
    assert_eq!(config.environment, Environment::Production);

    clear_config_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_config_env();
    env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
}
