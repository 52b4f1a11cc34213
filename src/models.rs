// ABOUTME: Core data models for users, habit check-ins, workouts, and weekly progress
// ABOUTME: Defines persisted structures plus the payload types accepted by write endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! # Data Models
//!
//! Core data structures used throughout the Vita Wellness Server.
//!
//! ## Design Principles
//!
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Type Safe**: strong typing prevents common data handling errors
//! - **Calendar-day keyed**: daily records carry a [`NaiveDate`] normalized to
//!   midnight; time-of-day is never stored
//!
//! ## Core Models
//!
//! - [`User`]: account profile with bcrypt password hash
//! - [`HabitCheckIn`]: one user's daily snapshot of habit flags
//! - [`WorkoutSession`] / [`WorkoutExercise`]: a logged training session
//! - [`WeeklyProgress`]: weekly photo set with date range

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address (unique, used for login)
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Bcrypt password hash; never serialized into responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last profile update time
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given email and password hash
    #[must_use]
    pub fn new(email: String, password_hash: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One user's daily habit snapshot, unique per (user, calendar day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCheckIn {
    /// Unique record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day this record covers (normalized to midnight)
    pub date: NaiveDate,

    // Morning habits
    /// Legs up the wall (lymph drainage)
    pub legs_up_wall: bool,
    /// Dry brushing
    pub dry_brushing: bool,
    /// Contrast shower
    pub contrast_shower: bool,
    /// Morning hydration with electrolytes
    pub morning_hydration: bool,

    // Daytime habits
    /// Hourly movement breaks
    pub hourly_movement: bool,
    /// Steps walked, compared against the daily step goal
    pub steps_count: Option<u32>,
    /// Water intake in liters, compared against the hydration goal
    pub daily_hydration: Option<f64>,

    // Evening habits
    /// Glute activation exercises
    pub glute_exercises: bool,
    /// Toe pick-ups
    pub toe_pickups: bool,
    /// Oil massage or cupping
    pub oil_massage: bool,
    /// Magnesium application
    pub magnesium_app: bool,
    /// Legs elevated before bed
    pub legs_elevated: bool,

    // Nutrition habits
    /// Collagen supplement taken
    pub collagen_intake: bool,
    /// Protein included at every meal
    pub protein_meals: bool,
    /// Sugar intake kept low
    pub low_sugar: bool,
    /// Seed oils avoided
    pub avoid_seed_oils: bool,

    /// Optional free-text note for the day
    pub notes: Option<String>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Last upsert time
    pub updated_at: DateTime<Utc>,
}

impl HabitCheckIn {
    /// Build a full check-in record for a day from an upsert payload.
    /// Absent boolean flags become false, absent trackables stay empty.
    #[must_use]
    pub fn from_data(user_id: Uuid, date: NaiveDate, data: &HabitCheckInData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            legs_up_wall: data.legs_up_wall.unwrap_or(false),
            dry_brushing: data.dry_brushing.unwrap_or(false),
            contrast_shower: data.contrast_shower.unwrap_or(false),
            morning_hydration: data.morning_hydration.unwrap_or(false),
            hourly_movement: data.hourly_movement.unwrap_or(false),
            steps_count: data.steps_count,
            daily_hydration: data.daily_hydration,
            glute_exercises: data.glute_exercises.unwrap_or(false),
            toe_pickups: data.toe_pickups.unwrap_or(false),
            oil_massage: data.oil_massage.unwrap_or(false),
            magnesium_app: data.magnesium_app.unwrap_or(false),
            legs_elevated: data.legs_elevated.unwrap_or(false),
            collagen_intake: data.collagen_intake.unwrap_or(false),
            protein_meals: data.protein_meals.unwrap_or(false),
            low_sugar: data.low_sugar.unwrap_or(false),
            avoid_seed_oils: data.avoid_seed_oils.unwrap_or(false),
            notes: data.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The fourteen boolean habit flags in rubric order.
    ///
    /// This is the single enumeration the completion score is derived from;
    /// the trackables (steps, hydration) are scored separately.
    #[must_use]
    pub const fn boolean_flags(&self) -> [bool; 14] {
        [
            self.legs_up_wall,
            self.dry_brushing,
            self.contrast_shower,
            self.morning_hydration,
            self.hourly_movement,
            self.glute_exercises,
            self.toe_pickups,
            self.oil_massage,
            self.magnesium_app,
            self.legs_elevated,
            self.collagen_intake,
            self.protein_meals,
            self.low_sugar,
            self.avoid_seed_oils,
        ]
    }
}

/// Upsert payload for a daily habit check-in.
/// Every field is optional; the calendar day defaults to today at the route layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitCheckInData {
    /// Calendar day being checked in; defaults to the current day
    pub date: Option<NaiveDate>,
    /// Legs up the wall
    pub legs_up_wall: Option<bool>,
    /// Dry brushing
    pub dry_brushing: Option<bool>,
    /// Contrast shower
    pub contrast_shower: Option<bool>,
    /// Morning hydration
    pub morning_hydration: Option<bool>,
    /// Hourly movement
    pub hourly_movement: Option<bool>,
    /// Steps walked
    pub steps_count: Option<u32>,
    /// Water intake in liters
    pub daily_hydration: Option<f64>,
    /// Glute exercises
    pub glute_exercises: Option<bool>,
    /// Toe pick-ups
    pub toe_pickups: Option<bool>,
    /// Oil massage
    pub oil_massage: Option<bool>,
    /// Magnesium application
    pub magnesium_app: Option<bool>,
    /// Legs elevated
    pub legs_elevated: Option<bool>,
    /// Collagen supplement
    pub collagen_intake: Option<bool>,
    /// Protein at meals
    pub protein_meals: Option<bool>,
    /// Low sugar
    pub low_sugar: Option<bool>,
    /// Seed oils avoided
    pub avoid_seed_oils: Option<bool>,
    /// Free-text note
    pub notes: Option<String>,
}

/// A logged workout session with its exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique session identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day of the session (normalized to midnight)
    pub date: NaiveDate,
    /// Program week this session belongs to
    pub week_number: u32,
    /// Session index within the week
    pub workout_number: u32,
    /// Optional session notes
    pub notes: Option<String>,
    /// Session duration in minutes
    pub duration_minutes: Option<u32>,
    /// Whether the session was completed
    pub completed: bool,
    /// Exercises performed, in insertion order
    pub exercises: Vec<WorkoutExercise>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// One exercise entry within a workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique exercise-entry identifier
    pub id: Uuid,
    /// Parent workout session
    pub workout_id: Uuid,
    /// Exercise name (e.g. "Goblet Squat")
    pub exercise_name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight used, in kilograms
    pub weight: Option<f64>,
    /// Whether this exercise was completed
    pub completed: bool,
}

/// Create/update payload for a workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSessionData {
    /// Calendar day of the session; defaults to the current day
    pub date: Option<NaiveDate>,
    /// Program week number
    pub week_number: u32,
    /// Session index within the week
    pub workout_number: u32,
    /// Exercises performed
    pub exercises: Vec<WorkoutExerciseData>,
    /// Optional notes
    pub notes: Option<String>,
    /// Duration in minutes
    pub duration_minutes: Option<u32>,
    /// Completion flag; defaults to false
    pub completed: Option<bool>,
}

/// One exercise entry within a workout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExerciseData {
    /// Exercise name
    pub exercise_name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight used, in kilograms
    pub weight: Option<f64>,
    /// Completion flag; defaults to false
    pub completed: Option<bool>,
}

impl WorkoutSession {
    /// Build a session (with exercise rows) from a create payload
    #[must_use]
    pub fn from_data(user_id: Uuid, date: NaiveDate, data: &WorkoutSessionData) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let exercises = data
            .exercises
            .iter()
            .map(|exercise| WorkoutExercise {
                id: Uuid::new_v4(),
                workout_id: id,
                exercise_name: exercise.exercise_name.clone(),
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
                completed: exercise.completed.unwrap_or(false),
            })
            .collect();

        Self {
            id,
            user_id,
            date,
            week_number: data.week_number,
            workout_number: data.workout_number,
            notes: data.notes.clone(),
            duration_minutes: data.duration_minutes,
            completed: data.completed.unwrap_or(false),
            exercises,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Weekly progress entry: a photo set covering one program week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Program week this entry covers (unique per user)
    pub week_number: u32,
    /// First day of the covered week
    pub start_date: NaiveDate,
    /// Last day of the covered week
    pub end_date: NaiveDate,
    /// Stored filename of the front photo
    pub front_photo: String,
    /// Stored filename of the back photo
    pub back_photo: String,
    /// Stored filename of the side photo
    pub side_photo: String,
    /// Optional notes for the week
    pub notes: Option<String>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl WeeklyProgress {
    /// Create a new weekly progress entry
    #[must_use]
    pub fn new(
        user_id: Uuid,
        week_number: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        front_photo: String,
        back_photo: String,
        side_photo: String,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            week_number,
            start_date,
            end_date,
            front_photo,
            back_photo,
            side_photo,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_defaults_absent_flags_to_false() {
        let data = HabitCheckInData {
            morning_hydration: Some(true),
            ..HabitCheckInData::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let check_in = HabitCheckIn::from_data(Uuid::new_v4(), date, &data);

        assert!(check_in.morning_hydration);
        assert!(!check_in.legs_up_wall);
        assert!(!check_in.avoid_seed_oils);
        assert_eq!(check_in.steps_count, None);
        assert_eq!(check_in.daily_hydration, None);
    }

    #[test]
    fn boolean_flags_enumerates_all_fourteen() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let check_in =
            HabitCheckIn::from_data(Uuid::new_v4(), date, &HabitCheckInData::default());
        assert_eq!(check_in.boolean_flags().len(), 14);
    }
}
