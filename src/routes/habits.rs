// ABOUTME: Habit check-in route handlers: upsert, single-day fetch, listing, and stats
// ABOUTME: Stats load the full history and delegate to the pure intelligence engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Habit check-in routes.
//!
//! The check-in write is an idempotent upsert keyed on (user, day); the stats
//! endpoint recomputes streaks fresh from all records on every request,
//! passing today's date into the engine explicitly.

use crate::errors::AppError;
use crate::intelligence::HabitStatsCalculator;
use crate::models::{HabitCheckIn, HabitCheckInData};
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the check-in listing
#[derive(Debug, Deserialize)]
struct CheckInListQuery {
    /// Earliest day to include
    start_date: Option<NaiveDate>,
    /// Latest day to include
    end_date: Option<NaiveDate>,
}

/// Habit routes
pub struct HabitRoutes;

impl HabitRoutes {
    /// Create all habit routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/habits",
                get(Self::handle_list)
                    .post(Self::handle_upsert)
                    .put(Self::handle_upsert),
            )
            .route("/api/habits/stats", get(Self::handle_stats))
            .route("/api/habits/:date", get(Self::handle_get_by_date))
            .with_state(resources)
    }

    /// Upsert the check-in for one day (defaults to today)
    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(data): Json<HabitCheckInData>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let date = data.date.unwrap_or_else(|| Utc::now().date_naive());
        let check_in = HabitCheckIn::from_data(auth.user_id, date, &data);

        let saved = resources
            .database
            .upsert_habit_check_in(&check_in)
            .await
            .map_err(|e| AppError::internal(format!("Habit check-in save failed: {e}")))?;

        Ok((StatusCode::OK, Json(saved)).into_response())
    }

    /// Fetch the check-in for one calendar day
    async fn handle_get_by_date(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(date): Path<NaiveDate>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let check_in = resources
            .database
            .get_habit_check_in(auth.user_id, date)
            .await
            .map_err(|e| AppError::internal(format!("Habit check-in lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Habit check-in"))?;

        Ok((StatusCode::OK, Json(check_in)).into_response())
    }

    /// List check-ins, newest first, optionally bounded by a date range
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CheckInListQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let check_ins = resources
            .database
            .get_habit_check_ins(auth.user_id, query.start_date, query.end_date)
            .await
            .map_err(|e| AppError::internal(format!("Habit check-in listing failed: {e}")))?;

        Ok((StatusCode::OK, Json(check_ins)).into_response())
    }

    /// Compute aggregate habit statistics over the full history
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let check_ins = resources
            .database
            .get_habit_check_ins(auth.user_id, None, None)
            .await
            .map_err(|e| AppError::internal(format!("Habit history load failed: {e}")))?;

        let calculator = HabitStatsCalculator::new();
        let stats = calculator.compute_stats(&check_ins, Utc::now().date_naive());

        Ok((StatusCode::OK, Json(stats)).into_response())
    }
}
