// ABOUTME: Workout session and exercise database operations
// ABOUTME: Sessions own their exercise rows; updates replace the exercise set wholesale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

use super::{parse_uuid, Database};
use crate::models::{WorkoutExercise, WorkoutSession};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the workout session and exercise tables
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                workout_number INTEGER NOT NULL,
                notes TEXT,
                duration_minutes INTEGER,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workout_sessions(id) ON DELETE CASCADE,
                exercise_name TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                weight REAL,
                completed INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_week ON workout_sessions(user_id, week_number)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_date ON workout_sessions(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a workout session together with its exercise rows
    ///
    /// # Errors
    ///
    /// Returns an error if any insert in the transaction fails
    pub async fn create_workout_session(&self, session: &WorkoutSession) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO workout_sessions (
                id, user_id, date, week_number, workout_number,
                notes, duration_minutes, completed, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.date)
        .bind(session.week_number)
        .bind(session.workout_number)
        .bind(&session.notes)
        .bind(session.duration_minutes)
        .bind(session.completed)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *tx)
        .await?;

        for exercise in &session.exercises {
            sqlx::query(
                r"
                INSERT INTO workout_exercises (id, workout_id, exercise_name, sets, reps, weight, completed)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(exercise.id.to_string())
            .bind(exercise.workout_id.to_string())
            .bind(&exercise.exercise_name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .bind(exercise.completed)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Fetch one session by id, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed
    pub async fn get_workout_session(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<Option<WorkoutSession>> {
        let row = sqlx::query("SELECT * FROM workout_sessions WHERE id = ?1 AND user_id = ?2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        let shell = row.map(|row| Self::row_to_session_shell(&row)).transpose()?;
        match shell {
            Some(session) => Ok(Some(self.attach_exercises(session).await?)),
            None => Ok(None),
        }
    }

    /// Fetch the session logged on one calendar day, if any
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed
    pub async fn get_workout_session_by_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<WorkoutSession>> {
        let row = sqlx::query(
            "SELECT * FROM workout_sessions WHERE user_id = ?1 AND date = ?2 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        let shell = row.map(|row| Self::row_to_session_shell(&row)).transpose()?;
        match shell {
            Some(session) => Ok(Some(self.attach_exercises(session).await?)),
            None => Ok(None),
        }
    }

    /// List a user's sessions, newest first, optionally bounded by dates
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed
    pub async fn get_workout_sessions(
        &self,
        user_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workout_sessions
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

        let mut sessions = rows
            .iter()
            .map(Self::row_to_session_shell)
            .collect::<Result<Vec<_>>>()?;
        drop(rows);

        for session in &mut sessions {
            session.exercises = self.load_exercises(session.id).await?;
        }

        Ok(sessions)
    }

    /// List the sessions of one program week, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed
    pub async fn get_workouts_by_week(
        &self,
        user_id: Uuid,
        week_number: u32,
    ) -> Result<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            "SELECT * FROM workout_sessions WHERE user_id = ?1 AND week_number = ?2 ORDER BY date ASC",
        )
        .bind(user_id.to_string())
        .bind(week_number)
        .fetch_all(&self.pool)
        .await?;

        let mut sessions = rows
            .iter()
            .map(Self::row_to_session_shell)
            .collect::<Result<Vec<_>>>()?;
        drop(rows);

        for session in &mut sessions {
            session.exercises = self.load_exercises(session.id).await?;
        }

        Ok(sessions)
    }

    /// Update a session's fields and replace its exercise rows wholesale.
    /// Returns the updated session, or `None` when the id does not exist for
    /// this user.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails
    pub async fn update_workout_session(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        session: &WorkoutSession,
    ) -> Result<Option<WorkoutSession>> {
        if self.get_workout_session(user_id, workout_id).await?.is_none() {
            return Ok(None);
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            UPDATE workout_sessions SET
                date = ?1,
                week_number = ?2,
                workout_number = ?3,
                notes = ?4,
                duration_minutes = ?5,
                completed = ?6,
                updated_at = ?7
            WHERE id = ?8 AND user_id = ?9
            ",
        )
        .bind(session.date)
        .bind(session.week_number)
        .bind(session.workout_number)
        .bind(&session.notes)
        .bind(session.duration_minutes)
        .bind(session.completed)
        .bind(Utc::now())
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?1")
            .bind(workout_id.to_string())
            .execute(&mut *tx)
            .await?;

        for exercise in &session.exercises {
            sqlx::query(
                r"
                INSERT INTO workout_exercises (id, workout_id, exercise_name, sets, reps, weight, completed)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(exercise.id.to_string())
            .bind(workout_id.to_string())
            .bind(&exercise.exercise_name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .bind(exercise.completed)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_workout_session(user_id, workout_id).await
    }

    /// Delete a session and its exercises. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete statement fails
    pub async fn delete_workout_session(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?1")
            .bind(workout_id.to_string())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workout_sessions WHERE id = ?1 AND user_id = ?2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all sessions a user has logged
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_workout_sessions(&self, user_id: Uuid) -> Result<u32> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM workout_sessions WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count as u32)
    }

    /// Count a user's sessions within one program week
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_workouts_in_week(&self, user_id: Uuid, week_number: u32) -> Result<u32> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM workout_sessions WHERE user_id = ?1 AND week_number = ?2",
        )
        .bind(user_id.to_string())
        .bind(week_number)
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count as u32)
    }

    /// Map a session row without its exercises
    fn row_to_session_shell(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutSession> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;

        Ok(WorkoutSession {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            date: row.try_get("date")?,
            week_number: row.try_get("week_number")?,
            workout_number: row.try_get("workout_number")?,
            notes: row.try_get("notes")?,
            duration_minutes: row.try_get("duration_minutes")?,
            completed: row.try_get("completed")?,
            exercises: Vec::new(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Fill in a shell session's exercises
    async fn attach_exercises(&self, mut session: WorkoutSession) -> Result<WorkoutSession> {
        session.exercises = self.load_exercises(session.id).await?;
        Ok(session)
    }

    /// Load a session's exercise rows in insertion order
    async fn load_exercises(&self, session_id: Uuid) -> Result<Vec<WorkoutExercise>> {
        let rows =
            sqlx::query("SELECT * FROM workout_exercises WHERE workout_id = ?1 ORDER BY rowid ASC")
                .bind(session_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|row| -> Result<WorkoutExercise> {
                let exercise_id: String = row.try_get("id")?;
                Ok(WorkoutExercise {
                    id: parse_uuid(&exercise_id)?,
                    workout_id: session_id,
                    exercise_name: row.try_get("exercise_name")?,
                    sets: row.try_get("sets")?,
                    reps: row.try_get("reps")?,
                    weight: row.try_get("weight")?,
                    completed: row.try_get("completed")?,
                })
            })
            .collect()
    }
}
