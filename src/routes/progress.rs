// ABOUTME: Weekly progress route handlers: photo upload, listing, update, and deletion
// ABOUTME: Accepts multipart uploads of front/back/side photos plus week metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Weekly progress routes.
//!
//! Creating an entry requires all three photos in one multipart request;
//! updates may replace any subset, and superseded files are removed from the
//! photo store after the row is updated.

use crate::errors::AppError;
use crate::models::WeeklyProgress;
use crate::server::ServerResources;
use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Accumulated multipart fields for a progress upload
#[derive(Debug, Default)]
struct ProgressUpload {
    week_number: Option<u32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
    front_photo: Option<(Option<String>, Vec<u8>)>,
    back_photo: Option<(Option<String>, Vec<u8>)>,
    side_photo: Option<(Option<String>, Vec<u8>)>,
}

impl ProgressUpload {
    /// Drain a multipart stream into typed fields, ignoring unknown parts
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().map(ToOwned::to_owned);
            let file_name = field.file_name().map(ToOwned::to_owned);

            match name.as_deref() {
                Some("week_number") => {
                    let text = Self::field_text(field).await?;
                    let week = text.parse::<u32>().map_err(|_| {
                        AppError::invalid_input(format!("Invalid week_number: {text}"))
                    })?;
                    upload.week_number = Some(week);
                }
                Some("start_date") => {
                    upload.start_date = Some(Self::parse_date(&Self::field_text(field).await?)?);
                }
                Some("end_date") => {
                    upload.end_date = Some(Self::parse_date(&Self::field_text(field).await?)?);
                }
                Some("notes") => {
                    upload.notes = Some(Self::field_text(field).await?);
                }
                Some("front_photo") => {
                    upload.front_photo = Some((file_name, Self::field_bytes(field).await?));
                }
                Some("back_photo") => {
                    upload.back_photo = Some((file_name, Self::field_bytes(field).await?));
                }
                Some("side_photo") => {
                    upload.side_photo = Some((file_name, Self::field_bytes(field).await?));
                }
                _ => {}
            }
        }

        Ok(upload)
    }

    async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
        field
            .text()
            .await
            .map_err(|e| AppError::invalid_input(format!("Unreadable multipart field: {e}")))
    }

    async fn field_bytes(field: axum::extract::multipart::Field<'_>) -> Result<Vec<u8>, AppError> {
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::invalid_input(format!("Unreadable multipart file: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn parse_date(text: &str) -> Result<NaiveDate, AppError> {
        text.parse::<NaiveDate>()
            .map_err(|_| AppError::invalid_input(format!("Invalid date: {text}")))
    }
}

/// Weekly progress routes
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/progress",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/progress/week/:week_number", get(Self::handle_get_week))
            .route(
                "/api/progress/:id",
                axum::routing::put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// List all progress entries, most recent week first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let progress = resources
            .database
            .get_all_progress(auth.user_id)
            .await
            .map_err(|e| AppError::internal(format!("Progress listing failed: {e}")))?;

        Ok((StatusCode::OK, Json(progress)).into_response())
    }

    /// Fetch the entry for one program week
    async fn handle_get_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(week_number): Path<u32>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let progress = resources
            .database
            .get_weekly_progress(auth.user_id, week_number)
            .await
            .map_err(|e| AppError::internal(format!("Progress lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Weekly progress"))?;

        Ok((StatusCode::OK, Json(progress)).into_response())
    }

    /// Create a progress entry; all three photos are required
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        multipart: Multipart,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;
        let upload = ProgressUpload::from_multipart(multipart).await?;

        let week_number = upload
            .week_number
            .ok_or_else(|| AppError::missing_field("week_number"))?;
        let start_date = upload
            .start_date
            .ok_or_else(|| AppError::missing_field("start_date"))?;
        let end_date = upload
            .end_date
            .ok_or_else(|| AppError::missing_field("end_date"))?;

        let (Some(front), Some(back), Some(side)) = (
            upload.front_photo,
            upload.back_photo,
            upload.side_photo,
        ) else {
            return Err(AppError::invalid_input(
                "All three photos (front, back, side) are required",
            ));
        };

        if resources
            .database
            .get_weekly_progress(auth.user_id, week_number)
            .await
            .map_err(|e| AppError::internal(format!("Progress lookup failed: {e}")))?
            .is_some()
        {
            return Err(AppError::already_exists(format!(
                "Progress for week {week_number} already exists"
            )));
        }

        let store = &resources.photo_store;
        let front_name = Self::save_photo(store, front).await?;
        let back_name = Self::save_photo(store, back).await?;
        let side_name = Self::save_photo(store, side).await?;

        let progress = WeeklyProgress::new(
            auth.user_id,
            week_number,
            start_date,
            end_date,
            front_name.clone(),
            back_name.clone(),
            side_name.clone(),
            upload.notes,
        );

        if let Err(e) = resources.database.create_weekly_progress(&progress).await {
            // Roll back the stored files so a failed insert leaves no orphans
            store.delete(&front_name).await;
            store.delete(&back_name).await;
            store.delete(&side_name).await;
            return Err(AppError::internal(format!("Progress creation failed: {e}")));
        }

        Ok((StatusCode::CREATED, Json(progress)).into_response())
    }

    /// Update an entry; photos provided in the payload replace stored ones
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(progress_id): Path<Uuid>,
        multipart: Multipart,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;
        let upload = ProgressUpload::from_multipart(multipart).await?;

        let existing = resources
            .database
            .get_weekly_progress_by_id(auth.user_id, progress_id)
            .await
            .map_err(|e| AppError::internal(format!("Progress lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Weekly progress"))?;

        let store = &resources.photo_store;
        let mut replaced = Vec::new();
        let mut updated = existing.clone();

        if let Some(photo) = upload.front_photo {
            replaced.push(existing.front_photo.clone());
            updated.front_photo = Self::save_photo(store, photo).await?;
        }
        if let Some(photo) = upload.back_photo {
            replaced.push(existing.back_photo.clone());
            updated.back_photo = Self::save_photo(store, photo).await?;
        }
        if let Some(photo) = upload.side_photo {
            replaced.push(existing.side_photo.clone());
            updated.side_photo = Self::save_photo(store, photo).await?;
        }

        if let Some(start_date) = upload.start_date {
            updated.start_date = start_date;
        }
        if let Some(end_date) = upload.end_date {
            updated.end_date = end_date;
        }
        if let Some(notes) = upload.notes {
            updated.notes = Some(notes);
        }

        resources
            .database
            .update_weekly_progress(&updated)
            .await
            .map_err(|e| AppError::internal(format!("Progress update failed: {e}")))?;

        // Superseded files go away only after the row points at the new ones
        for filename in replaced {
            store.delete(&filename).await;
        }

        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Delete an entry and its stored photos
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(progress_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers).await?;

        let existing = resources
            .database
            .get_weekly_progress_by_id(auth.user_id, progress_id)
            .await
            .map_err(|e| AppError::internal(format!("Progress lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("Weekly progress"))?;

        resources
            .database
            .delete_weekly_progress(auth.user_id, progress_id)
            .await
            .map_err(|e| AppError::internal(format!("Progress deletion failed: {e}")))?;

        let store = &resources.photo_store;
        store.delete(&existing.front_photo).await;
        store.delete(&existing.back_photo).await;
        store.delete(&existing.side_photo).await;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    async fn save_photo(
        store: &crate::media::PhotoStore,
        (file_name, bytes): (Option<String>, Vec<u8>),
    ) -> Result<String, AppError> {
        if bytes.is_empty() {
            return Err(AppError::invalid_input("Uploaded photo is empty"));
        }

        store
            .save(file_name.as_deref(), &bytes)
            .await
            .map_err(|e| AppError::internal(format!("Photo storage failed: {e}")))
    }
}
