// ABOUTME: HTTP route modules for auth, habits, workouts, progress, and health
// ABOUTME: Each module exposes a routes() constructor returning an axum Router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! REST route handlers.
//!
//! Handlers are thin wrappers: they authenticate, parse input, delegate to the
//! database or the intelligence layer, and shape the JSON response.

pub mod auth;
pub mod habits;
pub mod health;
pub mod progress;
pub mod workouts;

pub use auth::AuthRoutes;
pub use habits::HabitRoutes;
pub use health::HealthRoutes;
pub use progress::ProgressRoutes;
pub use workouts::WorkoutRoutes;
