// ABOUTME: Workout session route handlers: CRUD, weekly views, and completion summary
// ABOUTME: All operations are scoped to the authenticated user; updates replace exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Workout session routes.

use crate::constants::workouts::SESSIONS_PER_WEEK_TARGET;
use crate::errors::AppError;
use crate::models::{WorkoutSession, WorkoutSessionData};
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for the session listing
#[derive(Debug, Deserialize)]
struct WorkoutListQuery {
    /// Earliest day to include
    start_date: Option<NaiveDate>,
    /// Latest day to include
    end_date: Option<NaiveDate>,
}

/// Weekly workout completion summary
#[derive(Debug, Serialize)]
pub struct WorkoutCompletion {
    /// Current program week derived from the calendar
    pub current_week: u32,
    /// Sessions logged in the current week
    pub workouts_this_week: u32,
    /// Program target per week
    pub target_per_week: u32,
    /// All sessions ever logged
    pub total_workouts: u32,
}

/// Calendar week-of-year bucket, 1-based (Jan 1-7 is week 1)
fn week_of_year(date: NaiveDate) -> u32 {
    date.ordinal0() / 7 + 1
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/workouts/completion", get(Self::handle_completion))
            .route("/api/workouts/date/:date", get(Self::handle_get_by_date))
            .route("/api/workouts/week/:week_number", get(Self::handle_get_by_week))
            .route(
                "/api/workouts/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// List sessions, newest first, optionally bounded by a date range
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<WorkoutListQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let sessions = resources
            .database
            .get_workout_sessions(auth.user_id, query.start_date, query.end_date)
            .await
            .map_err(|e| AppError::internal(format!("Workout listing failed: {e}")))?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Fetch the session logged on one calendar day
    async fn handle_get_by_date(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(date): Path<NaiveDate>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let session = resources
            .database
            .get_workout_session_by_date(auth.user_id, date)
            .await
            .map_err(|e| AppError::internal(format!("Workout lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// List one program week's sessions, oldest first
    async fn handle_get_by_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(week_number): Path<u32>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let sessions = resources
            .database
            .get_workouts_by_week(auth.user_id, week_number)
            .await
            .map_err(|e| AppError::internal(format!("Workout week lookup failed: {e}")))?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Log a new workout session
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(data): Json<WorkoutSessionData>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let date = data.date.unwrap_or_else(|| Utc::now().date_naive());
        let session = WorkoutSession::from_data(auth.user_id, date, &data);

        resources
            .database
            .create_workout_session(&session)
            .await
            .map_err(|e| AppError::internal(format!("Workout creation failed: {e}")))?;

        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Update a session, replacing its exercise set wholesale
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
        Json(data): Json<WorkoutSessionData>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let existing = resources
            .database
            .get_workout_session(auth.user_id, workout_id)
            .await
            .map_err(|e| AppError::internal(format!("Workout lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        // The date stays unless the payload sets a new one
        let date = data.date.unwrap_or(existing.date);
        let replacement = WorkoutSession::from_data(auth.user_id, date, &data);

        let updated = resources
            .database
            .update_workout_session(auth.user_id, workout_id, &replacement)
            .await
            .map_err(|e| AppError::internal(format!("Workout update failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Delete a session and its exercises
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(workout_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let deleted = resources
            .database
            .delete_workout_session(auth.user_id, workout_id)
            .await
            .map_err(|e| AppError::internal(format!("Workout deletion failed: {e}")))?;

        if !deleted {
            return Err(AppError::not_found("Workout session"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Weekly completion summary against the program target
    async fn handle_completion(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let current_week = week_of_year(Utc::now().date_naive());
        let workouts_this_week = resources
            .database
            .count_workouts_in_week(auth.user_id, current_week)
            .await
            .map_err(|e| AppError::internal(format!("Workout count failed: {e}")))?;
        let total_workouts = resources
            .database
            .count_workout_sessions(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Workout count failed: {e}")))?;

        let completion = WorkoutCompletion {
            current_week,
            workouts_this_week,
            target_per_week: SESSIONS_PER_WEEK_TARGET,
            total_workouts,
        };

        Ok((StatusCode::OK, Json(completion)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_of_year_buckets_by_seven_days() {
        let jan_1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let jan_7 = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let jan_8 = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();

        assert_eq!(week_of_year(jan_1), 1);
        assert_eq!(week_of_year(jan_7), 1);
        assert_eq!(week_of_year(jan_8), 2);
    }
}
