// ABOUTME: Habit completion scoring and streak calculation over daily check-ins
// ABOUTME: Computes per-day scores, current/longest streaks, and completion rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Habit completion scoring and streak calculation.
//!
//! A day counts toward streaks when its completion score reaches the rubric
//! threshold. Both streak walks treat a missing calendar day and an incomplete
//! day as equally streak-breaking: the product rule is that a user must check
//! in and clear the bar every calendar day to keep a streak alive.
//!
//! The current streak additionally depends on a reference date (`as_of`),
//! passed in explicitly so the computation stays deterministic and testable;
//! the longest streak is a pure historical scan that does not decay with the
//! passage of time.

use crate::constants::habits::{
    BOOLEAN_HABIT_COUNT, COMPLETION_THRESHOLD, HYDRATION_GOAL_LITERS, STEPS_GOAL,
    TRACKABLE_HABIT_COUNT,
};
use crate::models::HabitCheckIn;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The scoring rubric: which numeric goals count and the per-day bar.
///
/// Kept as explicit configuration so the habit total is derived from the
/// rubric itself rather than a free-floating constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompletionRubric {
    /// Steps needed for the step trackable to score
    pub steps_goal: u32,
    /// Liters needed for the hydration trackable to score
    pub hydration_goal_liters: f64,
    /// Minimum per-day score for the day to count toward streaks
    pub completion_threshold: u8,
}

impl Default for CompletionRubric {
    fn default() -> Self {
        Self {
            steps_goal: STEPS_GOAL,
            hydration_goal_liters: HYDRATION_GOAL_LITERS,
            completion_threshold: COMPLETION_THRESHOLD,
        }
    }
}

impl CompletionRubric {
    /// Maximum achievable per-day score: every boolean flag plus both trackables.
    #[must_use]
    pub const fn max_score(&self) -> u8 {
        BOOLEAN_HABIT_COUNT + TRACKABLE_HABIT_COUNT
    }
}

/// Aggregate habit statistics for one user, recomputed fresh on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HabitStats {
    /// Number of check-in records
    pub total_days: u32,
    /// Days whose completion score reached the threshold
    pub completed_days: u32,
    /// Consecutive qualifying days ending at or adjacent to `as_of`
    pub current_streak: u32,
    /// Best run of consecutive qualifying days anywhere in history
    pub longest_streak: u32,
    /// `completed_days / total_days` as a rounded whole percentage
    pub completion_rate: u8,
}

/// Calculator for per-day completion scores and aggregate statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct HabitStatsCalculator {
    rubric: CompletionRubric,
}

impl HabitStatsCalculator {
    /// Create a calculator with the default rubric
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with a custom rubric
    #[must_use]
    pub const fn with_rubric(rubric: CompletionRubric) -> Self {
        Self { rubric }
    }

    /// The rubric in effect
    #[must_use]
    pub const fn rubric(&self) -> &CompletionRubric {
        &self.rubric
    }

    /// Completion score for a single day: each true boolean flag contributes 1,
    /// plus 1 per trackable whose value reaches its goal. Absent trackables
    /// score 0; no input is an error.
    #[must_use]
    pub fn day_completion(&self, check_in: &HabitCheckIn) -> u8 {
        let mut count = check_in.boolean_flags().iter().filter(|flag| **flag).count() as u8;

        if check_in
            .steps_count
            .is_some_and(|steps| steps >= self.rubric.steps_goal)
        {
            count += 1;
        }
        if check_in
            .daily_hydration
            .is_some_and(|liters| liters >= self.rubric.hydration_goal_liters)
        {
            count += 1;
        }

        count
    }

    /// Aggregate statistics over all of one user's check-ins.
    ///
    /// `as_of` is the reference calendar day for the current-streak recency
    /// check; the input order does not matter. An empty input yields all-zero
    /// stats.
    #[must_use]
    pub fn compute_stats(&self, check_ins: &[HabitCheckIn], as_of: NaiveDate) -> HabitStats {
        if check_ins.is_empty() {
            return HabitStats::default();
        }

        // One ascending sort feeds both streak walks.
        let mut sorted: Vec<&HabitCheckIn> = check_ins.iter().collect();
        sorted.sort_by_key(|check_in| check_in.date);

        let total_days = sorted.len() as u32;
        let completed_days = sorted
            .iter()
            .filter(|check_in| self.day_completion(check_in) >= self.rubric.completion_threshold)
            .count() as u32;

        let completion_rate =
            (f64::from(completed_days) / f64::from(total_days) * 100.0).round() as u8;

        HabitStats {
            total_days,
            completed_days,
            current_streak: self.current_streak(&sorted, as_of),
            longest_streak: self.longest_streak(&sorted),
            completion_rate,
        }
    }

    /// Walk backwards from the most recent record. The streak is 0 when the
    /// most recent record is older than yesterday relative to `as_of`; it ends
    /// at the first below-threshold day or at a gap of more than one day.
    fn current_streak(&self, sorted_asc: &[&HabitCheckIn], as_of: NaiveDate) -> u32 {
        let Some(latest) = sorted_asc.last() else {
            return 0;
        };

        let days_since_latest = (as_of - latest.date).num_days();
        if days_since_latest > 1 {
            return 0;
        }

        let mut streak = 0;
        for index in (0..sorted_asc.len()).rev() {
            if self.day_completion(sorted_asc[index]) < self.rubric.completion_threshold {
                break;
            }
            streak += 1;

            if index > 0 {
                let gap = (sorted_asc[index].date - sorted_asc[index - 1].date).num_days();
                if gap > 1 {
                    break;
                }
            }
        }

        streak
    }

    /// Forward scan tracking the best run. The running counter resets on a
    /// below-threshold day, or after a more-than-one-day gap to the next
    /// record; the day preceding a gap still counts toward the maximum before
    /// the reset takes effect.
    fn longest_streak(&self, sorted_asc: &[&HabitCheckIn]) -> u32 {
        let mut longest = 0;
        let mut run = 0;

        for (index, check_in) in sorted_asc.iter().enumerate() {
            if self.day_completion(check_in) >= self.rubric.completion_threshold {
                run += 1;
                longest = longest.max(run);

                if let Some(next) = sorted_asc.get(index + 1) {
                    let gap = (next.date - check_in.date).num_days();
                    if gap > 1 {
                        run = 0;
                    }
                }
            } else {
                run = 0;
            }
        }

        longest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitCheckInData;
    use uuid::Uuid;

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).unwrap()
    }

    fn full_check_in(date: NaiveDate) -> HabitCheckIn {
        let data = HabitCheckInData {
            legs_up_wall: Some(true),
            dry_brushing: Some(true),
            contrast_shower: Some(true),
            morning_hydration: Some(true),
            hourly_movement: Some(true),
            steps_count: Some(10_000),
            daily_hydration: Some(2.5),
            glute_exercises: Some(true),
            toe_pickups: Some(true),
            oil_massage: Some(true),
            magnesium_app: Some(true),
            legs_elevated: Some(true),
            collagen_intake: Some(true),
            protein_meals: Some(true),
            low_sugar: Some(true),
            avoid_seed_oils: Some(true),
            ..HabitCheckInData::default()
        };
        HabitCheckIn::from_data(Uuid::new_v4(), date, &data)
    }

    #[test]
    fn max_score_is_sixteen() {
        let rubric = CompletionRubric::default();
        assert_eq!(rubric.max_score(), 16);

        // A fully satisfied day actually reaches the maximum.
        let calculator = HabitStatsCalculator::new();
        let check_in = full_check_in(day(2025, 3, 1));
        assert_eq!(calculator.day_completion(&check_in), rubric.max_score());
    }

    #[test]
    fn trackables_score_exactly_at_goal() {
        let calculator = HabitStatsCalculator::new();

        let mut check_in = full_check_in(day(2025, 3, 1));
        check_in.steps_count = Some(9_999);
        assert_eq!(calculator.day_completion(&check_in), 15);

        check_in.daily_hydration = Some(2.4);
        assert_eq!(calculator.day_completion(&check_in), 14);

        check_in.steps_count = None;
        check_in.daily_hydration = None;
        assert_eq!(calculator.day_completion(&check_in), 14);
    }
}
