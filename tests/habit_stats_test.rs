// ABOUTME: Unit tests for the habit completion and streak engine
// ABOUTME: Validates scoring, streak semantics, rounding, and edge cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use uuid::Uuid;
use vita_wellness_server::intelligence::{CompletionRubric, HabitStatsCalculator};
use vita_wellness_server::models::{HabitCheckIn, HabitCheckInData};

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

/// A check-in satisfying every habit: all 14 flags plus both trackables
fn qualifying(date: NaiveDate) -> HabitCheckIn {
    let mut check_in = with_bool_count(date, 14);
    check_in.steps_count = Some(12_000);
    check_in.daily_hydration = Some(3.0);
    check_in
}

/// A check-in with nothing satisfied
fn failing(date: NaiveDate) -> HabitCheckIn {
    with_bool_count(date, 0)
}

/// A check-in with exactly `count` boolean flags set and no trackables
fn with_bool_count(date: NaiveDate, count: usize) -> HabitCheckIn {
    let mut check_in = HabitCheckIn::from_data(Uuid::new_v4(), date, &HabitCheckInData::default());
    let flags: [&mut bool; 14] = [
        &mut check_in.legs_up_wall,
        &mut check_in.dry_brushing,
        &mut check_in.contrast_shower,
        &mut check_in.morning_hydration,
        &mut check_in.hourly_movement,
        &mut check_in.glute_exercises,
        &mut check_in.toe_pickups,
        &mut check_in.oil_massage,
        &mut check_in.magnesium_app,
        &mut check_in.legs_elevated,
        &mut check_in.collagen_intake,
        &mut check_in.protein_meals,
        &mut check_in.low_sugar,
        &mut check_in.avoid_seed_oils,
    ];
    for flag in flags.into_iter().take(count) {
        *flag = true;
    }
    check_in
}

#[test]
fn empty_history_yields_all_zero_stats() {
    let calculator = HabitStatsCalculator::new();
    let stats = calculator.compute_stats(&[], day(2025, 6, 1));

    assert_eq!(stats.total_days, 0);
    assert_eq!(stats.completed_days, 0);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 0);
    assert_eq!(stats.completion_rate, 0);
}

#[test]
fn fully_satisfied_day_reaches_the_rubric_maximum() {
    let calculator = HabitStatsCalculator::new();
    let rubric = CompletionRubric::default();

    assert_eq!(rubric.max_score(), 16);
    assert_eq!(
        calculator.day_completion(&qualifying(day(2025, 6, 1))),
        rubric.max_score()
    );
}

#[test]
fn twelve_score_counts_as_completed_eleven_does_not() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![
        with_bool_count(day(2025, 6, 1), 12),
        with_bool_count(day(2025, 6, 2), 11),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.total_days, 2);
    assert_eq!(stats.completed_days, 1);
}

#[test]
fn current_streak_counts_today_and_yesterday() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    // Today and yesterday qualify; the day before that is missing entirely.
    let records = vec![qualifying(day(2025, 6, 9)), qualifying(day(2025, 6, 10))];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.current_streak, 2);
}

#[test]
fn current_streak_is_zero_when_latest_record_is_three_days_old() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![
        qualifying(day(2025, 6, 5)),
        qualifying(day(2025, 6, 6)),
        qualifying(day(2025, 6, 7)),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.current_streak, 0);
    // History is untouched by the recency check.
    assert_eq!(stats.longest_streak, 3);
}

#[test]
fn current_streak_survives_a_yesterday_only_check_in() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![qualifying(day(2025, 6, 9))];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.current_streak, 1);
}

#[test]
fn current_streak_stops_at_an_incomplete_day() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![
        qualifying(day(2025, 6, 8)),
        failing(day(2025, 6, 9)),
        qualifying(day(2025, 6, 10)),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    // The incomplete day neither counts nor lets the walk continue past it.
    assert_eq!(stats.current_streak, 1);
}

#[test]
fn current_streak_stops_at_a_gap() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![
        qualifying(day(2025, 6, 6)),
        qualifying(day(2025, 6, 9)),
        qualifying(day(2025, 6, 10)),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.current_streak, 2);
}

#[test]
fn longest_streak_picks_the_best_segment() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 7, 1);

    // 3 consecutive completed days, a 2-day gap, then 5 consecutive days.
    let mut records = vec![
        qualifying(day(2025, 6, 1)),
        qualifying(day(2025, 6, 2)),
        qualifying(day(2025, 6, 3)),
    ];
    for dom in 6..=10 {
        records.push(qualifying(day(2025, 6, dom)));
    }
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.longest_streak, 5);
}

#[test]
fn day_preceding_a_gap_still_counts_toward_the_maximum() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 7, 1);

    let records = vec![
        qualifying(day(2025, 6, 1)),
        qualifying(day(2025, 6, 2)),
        qualifying(day(2025, 6, 20)),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.longest_streak, 2);
}

#[test]
fn longest_streak_resets_on_an_incomplete_day() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 7, 1);

    let records = vec![
        qualifying(day(2025, 6, 1)),
        qualifying(day(2025, 6, 2)),
        failing(day(2025, 6, 3)),
        qualifying(day(2025, 6, 4)),
    ];
    let stats = calculator.compute_stats(&records, as_of);

    assert_eq!(stats.longest_streak, 2);
}

#[test]
fn completion_rate_rounds_to_the_nearest_integer() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 7, 1);

    // 1 completed out of 3: 33.33 rounds down to 33.
    let records = vec![
        qualifying(day(2025, 6, 1)),
        failing(day(2025, 6, 2)),
        failing(day(2025, 6, 3)),
    ];
    assert_eq!(calculator.compute_stats(&records, as_of).completion_rate, 33);

    // 1 completed out of 8: 12.5 rounds half-up to 13.
    let mut records = vec![qualifying(day(2025, 6, 1))];
    for dom in 2..=8 {
        records.push(failing(day(2025, 6, dom)));
    }
    assert_eq!(calculator.compute_stats(&records, as_of).completion_rate, 13);
}

#[test]
fn compute_stats_is_pure_and_order_independent() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    let records = vec![
        qualifying(day(2025, 6, 10)),
        failing(day(2025, 6, 7)),
        qualifying(day(2025, 6, 9)),
        qualifying(day(2025, 6, 8)),
    ];

    let first = calculator.compute_stats(&records, as_of);
    let second = calculator.compute_stats(&records, as_of);
    assert_eq!(first, second);

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(calculator.compute_stats(&reversed, as_of), first);
}

#[test]
fn trackables_contribute_to_the_threshold() {
    let calculator = HabitStatsCalculator::new();
    let as_of = day(2025, 6, 10);

    // 10 flags plus both trackables crosses the 12 bar.
    let mut check_in = with_bool_count(day(2025, 6, 10), 10);
    check_in.steps_count = Some(10_000);
    check_in.daily_hydration = Some(2.5);

    let stats = calculator.compute_stats(&[check_in], as_of);
    assert_eq!(stats.completed_days, 1);
    assert_eq!(stats.current_streak, 1);
}
