// ABOUTME: Habit check-in database operations with upsert keyed on (user, day)
// ABOUTME: Provides single-day fetch, date-range listing, and full-history loads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

use super::{parse_uuid, Database};
use crate::models::HabitCheckIn;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the habit check-in table
    pub(super) async fn migrate_habits(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS habit_check_ins (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                legs_up_wall INTEGER NOT NULL DEFAULT 0,
                dry_brushing INTEGER NOT NULL DEFAULT 0,
                contrast_shower INTEGER NOT NULL DEFAULT 0,
                morning_hydration INTEGER NOT NULL DEFAULT 0,
                hourly_movement INTEGER NOT NULL DEFAULT 0,
                steps_count INTEGER,
                daily_hydration REAL,
                glute_exercises INTEGER NOT NULL DEFAULT 0,
                toe_pickups INTEGER NOT NULL DEFAULT 0,
                oil_massage INTEGER NOT NULL DEFAULT 0,
                magnesium_app INTEGER NOT NULL DEFAULT 0,
                legs_elevated INTEGER NOT NULL DEFAULT 0,
                collagen_intake INTEGER NOT NULL DEFAULT 0,
                protein_meals INTEGER NOT NULL DEFAULT 0,
                low_sugar INTEGER NOT NULL DEFAULT 0,
                avoid_seed_oils INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                UNIQUE(user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_habit_check_ins_user_date ON habit_check_ins(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or update the check-in for (user, day). On conflict the existing
    /// row keeps its id and creation time; all habit fields are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the follow-up read fails
    pub async fn upsert_habit_check_in(&self, check_in: &HabitCheckIn) -> Result<HabitCheckIn> {
        sqlx::query(
            r"
            INSERT INTO habit_check_ins (
                id, user_id, date,
                legs_up_wall, dry_brushing, contrast_shower, morning_hydration,
                hourly_movement, steps_count, daily_hydration,
                glute_exercises, toe_pickups, oil_massage, magnesium_app, legs_elevated,
                collagen_intake, protein_meals, low_sugar, avoid_seed_oils,
                notes, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
            ON CONFLICT(user_id, date) DO UPDATE SET
                legs_up_wall = excluded.legs_up_wall,
                dry_brushing = excluded.dry_brushing,
                contrast_shower = excluded.contrast_shower,
                morning_hydration = excluded.morning_hydration,
                hourly_movement = excluded.hourly_movement,
                steps_count = excluded.steps_count,
                daily_hydration = excluded.daily_hydration,
                glute_exercises = excluded.glute_exercises,
                toe_pickups = excluded.toe_pickups,
                oil_massage = excluded.oil_massage,
                magnesium_app = excluded.magnesium_app,
                legs_elevated = excluded.legs_elevated,
                collagen_intake = excluded.collagen_intake,
                protein_meals = excluded.protein_meals,
                low_sugar = excluded.low_sugar,
                avoid_seed_oils = excluded.avoid_seed_oils,
                notes = excluded.notes,
                updated_at = excluded.updated_at
            ",
        )
        .bind(check_in.id.to_string())
        .bind(check_in.user_id.to_string())
        .bind(check_in.date)
        .bind(check_in.legs_up_wall)
        .bind(check_in.dry_brushing)
        .bind(check_in.contrast_shower)
        .bind(check_in.morning_hydration)
        .bind(check_in.hourly_movement)
        .bind(check_in.steps_count)
        .bind(check_in.daily_hydration)
        .bind(check_in.glute_exercises)
        .bind(check_in.toe_pickups)
        .bind(check_in.oil_massage)
        .bind(check_in.magnesium_app)
        .bind(check_in.legs_elevated)
        .bind(check_in.collagen_intake)
        .bind(check_in.protein_meals)
        .bind(check_in.low_sugar)
        .bind(check_in.avoid_seed_oils)
        .bind(&check_in.notes)
        .bind(check_in.created_at)
        .bind(check_in.updated_at)
        .execute(&self.pool)
        .await?;

        self.get_habit_check_in(check_in.user_id, check_in.date)
            .await?
            .ok_or_else(|| anyhow!("Habit check-in missing immediately after upsert"))
    }

    /// Fetch the check-in for one (user, day)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_habit_check_in(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<HabitCheckIn>> {
        let row = sqlx::query("SELECT * FROM habit_check_ins WHERE user_id = ?1 AND date = ?2")
            .bind(user_id.to_string())
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_check_in(&row)).transpose()
    }

    /// List a user's check-ins, newest first, optionally bounded by dates
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_habit_check_ins(
        &self,
        user_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<HabitCheckIn>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM habit_check_ins
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_check_in).collect()
    }

    fn row_to_check_in(row: &sqlx::sqlite::SqliteRow) -> Result<HabitCheckIn> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;

        Ok(HabitCheckIn {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            date: row.try_get("date")?,
            legs_up_wall: row.try_get("legs_up_wall")?,
            dry_brushing: row.try_get("dry_brushing")?,
            contrast_shower: row.try_get("contrast_shower")?,
            morning_hydration: row.try_get("morning_hydration")?,
            hourly_movement: row.try_get("hourly_movement")?,
            steps_count: row.try_get("steps_count")?,
            daily_hydration: row.try_get("daily_hydration")?,
            glute_exercises: row.try_get("glute_exercises")?,
            toe_pickups: row.try_get("toe_pickups")?,
            oil_massage: row.try_get("oil_massage")?,
            magnesium_app: row.try_get("magnesium_app")?,
            legs_elevated: row.try_get("legs_elevated")?,
            collagen_intake: row.try_get("collagen_intake")?,
            protein_meals: row.try_get("protein_meals")?,
            low_sugar: row.try_get("low_sugar")?,
            avoid_seed_oils: row.try_get("avoid_seed_oils")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
