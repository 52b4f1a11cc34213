// ABOUTME: Main library entry point for the Vita Wellness API platform
// ABOUTME: Exposes auth, habit tracking, workouts, progress photos, and habit statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![deny(unsafe_code)]

//! # Vita Wellness Server
//!
//! A personal wellness-tracking backend: users authenticate, log daily habit
//! completion, record workout sessions, and upload weekly progress photos.
//! The server aggregates habit records into streaks, completion rates, and
//! dashboard summaries.
//!
//! ## Architecture
//!
//! - **Models**: common data structures for accounts and daily records
//! - **Database**: SQLite persistence with inline migrations
//! - **Intelligence**: pure habit-statistics engine (streaks, completion rate)
//! - **Routes**: REST endpoints over axum
//! - **Auth**: HS256 JWT issuance and bearer-token middleware
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vita_wellness_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Vita Wellness Server configured with port: {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuance, validation, and secret generation
pub mod auth;

/// Environment-based server configuration
pub mod config;

/// Habit goals, limits, and default values
pub mod constants;

/// SQLite persistence for all application data
pub mod database;

/// Unified error codes and HTTP error responses
pub mod errors;

/// Pure habit-statistics computations
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Progress photo storage
pub mod media;

/// Bearer-token authentication middleware
pub mod middleware;

/// Core data models
pub mod models;

/// REST route handlers
pub mod routes;

/// Router assembly and HTTP serving
pub mod server;
