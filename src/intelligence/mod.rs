// ABOUTME: Pure computation modules for habit statistics and dashboards
// ABOUTME: No I/O, no ambient clock; callers pass records and a reference date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! # Habit Intelligence
//!
//! Pure, synchronous statistics over a user's daily habit records. The engine
//! consumes an in-memory snapshot already fetched by the calling layer and
//! returns a summary value with no observable side effect, so it is safe to
//! invoke concurrently for different users without coordination.

pub mod habit_stats;

pub use habit_stats::{CompletionRubric, HabitStats, HabitStatsCalculator};
