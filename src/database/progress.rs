// ABOUTME: Weekly progress photo database operations
// ABOUTME: One entry per (user, week number); rows reference stored photo filenames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

use super::{parse_uuid, Database};
use crate::models::WeeklyProgress;
use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the weekly progress table
    pub(super) async fn migrate_progress(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weekly_progress (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                week_number INTEGER NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                front_photo TEXT NOT NULL,
                back_photo TEXT NOT NULL,
                side_photo TEXT NOT NULL,
                notes TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                UNIQUE(user_id, week_number)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new weekly progress entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including week-number conflicts)
    pub async fn create_weekly_progress(&self, progress: &WeeklyProgress) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO weekly_progress (
                id, user_id, week_number, start_date, end_date,
                front_photo, back_photo, side_photo, notes, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
        )
        .bind(progress.id.to_string())
        .bind(progress.user_id.to_string())
        .bind(progress.week_number)
        .bind(progress.start_date)
        .bind(progress.end_date)
        .bind(&progress.front_photo)
        .bind(&progress.back_photo)
        .bind(&progress.side_photo)
        .bind(&progress.notes)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a user's entry for one program week
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_weekly_progress(
        &self,
        user_id: Uuid,
        week_number: u32,
    ) -> Result<Option<WeeklyProgress>> {
        let row =
            sqlx::query("SELECT * FROM weekly_progress WHERE user_id = ?1 AND week_number = ?2")
                .bind(user_id.to_string())
                .bind(week_number)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|row| Self::row_to_progress(&row)).transpose()
    }

    /// Fetch one entry by id, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_weekly_progress_by_id(
        &self,
        user_id: Uuid,
        progress_id: Uuid,
    ) -> Result<Option<WeeklyProgress>> {
        let row = sqlx::query("SELECT * FROM weekly_progress WHERE id = ?1 AND user_id = ?2")
            .bind(progress_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_progress(&row)).transpose()
    }

    /// List all of a user's entries, most recent week first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_all_progress(&self, user_id: Uuid) -> Result<Vec<WeeklyProgress>> {
        let rows =
            sqlx::query("SELECT * FROM weekly_progress WHERE user_id = ?1 ORDER BY week_number DESC")
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(Self::row_to_progress).collect()
    }

    /// Update an entry's dates, notes, and photo filenames
    ///
    /// # Errors
    ///
    /// Returns an error if the update statement fails
    pub async fn update_weekly_progress(&self, progress: &WeeklyProgress) -> Result<()> {
        sqlx::query(
            r"
            UPDATE weekly_progress SET
                start_date = ?1,
                end_date = ?2,
                front_photo = ?3,
                back_photo = ?4,
                side_photo = ?5,
                notes = ?6,
                updated_at = ?7
            WHERE id = ?8 AND user_id = ?9
            ",
        )
        .bind(progress.start_date)
        .bind(progress.end_date)
        .bind(&progress.front_photo)
        .bind(&progress.back_photo)
        .bind(&progress.side_photo)
        .bind(&progress.notes)
        .bind(Utc::now())
        .bind(progress.id.to_string())
        .bind(progress.user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete one entry. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete statement fails
    pub async fn delete_weekly_progress(&self, user_id: Uuid, progress_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weekly_progress WHERE id = ?1 AND user_id = ?2")
            .bind(progress_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_progress(row: &sqlx::sqlite::SqliteRow) -> Result<WeeklyProgress> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;

        Ok(WeeklyProgress {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            week_number: row.try_get("week_number")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            front_photo: row.try_get("front_photo")?,
            back_photo: row.try_get("back_photo")?,
            side_photo: row.try_get("side_photo")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
