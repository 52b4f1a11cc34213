// ABOUTME: Central constants for habit goals, auth limits, and server defaults
// ABOUTME: Single source of truth for rubric goals and configuration fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Application-wide constants.

/// Habit rubric goals and thresholds
pub mod habits {
    /// Daily step goal for the steps trackable to count as satisfied
    pub const STEPS_GOAL: u32 = 10_000;

    /// Daily hydration goal in liters for the hydration trackable
    pub const HYDRATION_GOAL_LITERS: f64 = 2.5;

    /// Minimum per-day score for a day to count toward streaks (12/16 = 75%)
    pub const COMPLETION_THRESHOLD: u8 = 12;

    /// Number of boolean habit flags on a check-in
    pub const BOOLEAN_HABIT_COUNT: u8 = 14;

    /// Number of trackable (numeric-goal) habits: steps and hydration
    pub const TRACKABLE_HABIT_COUNT: u8 = 2;
}

/// Workout program defaults
pub mod workouts {
    /// Target workout sessions per week for the completion summary
    pub const SESSIONS_PER_WEEK_TARGET: u32 = 2;
}

/// Authentication and session limits
pub mod limits {
    /// JWT lifetime in hours (7 days)
    pub const JWT_EXPIRY_HOURS: i64 = 168;

    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Maximum accepted multipart upload size in bytes (25 MB)
    pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

    /// Generated JWT secret length in bytes
    pub const JWT_SECRET_LENGTH: usize = 64;
}

/// Default server configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 5000;

    /// Default SQLite database URL
    pub const DATABASE_URL: &str = "sqlite:./vita.db";

    /// Default directory for stored progress photos
    pub const UPLOADS_DIR: &str = "./uploads";
}

/// Environment variable names read by `ServerConfig::from_env`
pub mod env_config {
    /// HTTP port override
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// JWT signing secret (hex or raw); generated when absent
    pub const JWT_SECRET: &str = "JWT_SECRET";

    /// Progress photo storage directory
    pub const UPLOADS_DIR: &str = "UPLOADS_DIR";

    /// Allowed CORS origin for browser clients
    pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in logs
pub mod service_names {
    /// Canonical service name
    pub const VITA_WELLNESS_SERVER: &str = "vita-wellness-server";
}
