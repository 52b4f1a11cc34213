// ABOUTME: Router-level integration tests exercising the REST API end to end
// ABOUTME: Drives registration, login, habit stats, workouts, and photo upload flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use vita_wellness_server::server::WellnessServer;

const BOUNDARY: &str = "vita-test-boundary";

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Register a fresh account and return its bearer token
async fn register(router: &Router, email: &str) -> String {
    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "email": email,
                "password": "correct horse",
                "first_name": "Test",
                "last_name": "User",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_owned()
}

fn multipart_text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn multipart_file_part(name: &str, filename: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n{contents}\r\n"
    )
}

fn multipart_request(uri: &str, token: &str, parts: &[String]) -> Request<Body> {
    let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);

    let (status, body) = send(&router, get_request("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);

    let token = register(&router, "flow@example.com").await;

    // Duplicate registration conflicts.
    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "email": "flow@example.com",
                "password": "correct horse",
                "first_name": "Test",
                "last_name": "User",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Login with the right password succeeds.
    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": "flow@example.com", "password": "correct horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert!(body["user"].get("password_hash").is_none());

    // Login with the wrong password fails closed.
    let (status, _) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": "flow@example.com", "password": "wrong horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The profile endpoint requires and honors the token.
    let (status, body) = send(&router, get_request("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "flow@example.com");

    let (status, _) = send(&router, get_request("/api/auth/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({
                "email": "weak@example.com",
                "password": "short",
                "first_name": "Test",
                "last_name": "User",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_habit_check_in_and_stats_flow() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);
    let token = register(&router, "habits@example.com").await;

    // Check in for today with every habit satisfied (date defaults to today).
    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/habits",
            Some(&token),
            &json!({
                "legs_up_wall": true, "dry_brushing": true, "contrast_shower": true,
                "morning_hydration": true, "hourly_movement": true, "glute_exercises": true,
                "toe_pickups": true, "oil_massage": true, "magnesium_app": true,
                "legs_elevated": true, "collagen_intake": true, "protein_meals": true,
                "low_sugar": true, "avoid_seed_oils": true,
                "steps_count": 12_000, "daily_hydration": 3.0,
                "notes": "solid day",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let today = body["date"].as_str().unwrap().to_owned();

    // Stats over the single record: one completed day, a one-day streak.
    let (status, stats) = send(&router, get_request("/api/habits/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_days"], 1);
    assert_eq!(stats["completed_days"], 1);
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["longest_streak"], 1);
    assert_eq!(stats["completion_rate"], 100);

    // The day's record is retrievable; a missing day is a 404.
    let (status, body) = send(
        &router,
        get_request(&format!("/api/habits/{today}"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], "solid day");

    let (status, body) = send(
        &router,
        get_request("/api/habits/2030-01-01", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_workout_create_list_and_completion() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);
    let token = register(&router, "workouts@example.com").await;

    let (status, created) = send(
        &router,
        json_request(
            "POST",
            "/api/workouts",
            Some(&token),
            &json!({
                "week_number": 1,
                "workout_number": 1,
                "exercises": [
                    {"exercise_name": "Goblet Squat", "sets": 3, "reps": 12, "weight": 16.0, "completed": true}
                ],
                "duration_minutes": 40,
                "completed": true,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["exercises"][0]["exercise_name"], "Goblet Squat");

    let (status, sessions) = send(&router, get_request("/api/workouts", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions.as_array().unwrap().len(), 1);

    let (status, completion) = send(
        &router,
        get_request("/api/workouts/completion", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completion["target_per_week"], 2);
    assert_eq!(completion["total_workouts"], 1);
}

#[tokio::test]
async fn test_progress_upload_requires_all_three_photos() {
    let (resources, _uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);
    let token = register(&router, "photos@example.com").await;

    let parts = vec![
        multipart_text_part("week_number", "1"),
        multipart_text_part("start_date", "2025-04-01"),
        multipart_text_part("end_date", "2025-04-07"),
        multipart_file_part("front_photo", "front.jpg", "front-bytes"),
    ];
    let (status, body) = send(&router, multipart_request("/api/progress", &token, &parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_progress_upload_stores_photos() {
    let (resources, uploads) = common::test_resources().await;
    let router = WellnessServer::router(resources);
    let token = register(&router, "uploader@example.com").await;

    let parts = vec![
        multipart_text_part("week_number", "1"),
        multipart_text_part("start_date", "2025-04-01"),
        multipart_text_part("end_date", "2025-04-07"),
        multipart_text_part("notes", "first week"),
        multipart_file_part("front_photo", "front.jpg", "front-bytes"),
        multipart_file_part("back_photo", "back.jpg", "back-bytes"),
        multipart_file_part("side_photo", "side.jpg", "side-bytes"),
    ];
    let (status, body) = send(&router, multipart_request("/api/progress", &token, &parts)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["week_number"], 1);
    assert_eq!(body["notes"], "first week");
    assert!(body["front_photo"].as_str().unwrap().ends_with(".jpg"));

    // The three files landed in the uploads directory.
    let stored = std::fs::read_dir(uploads.path()).unwrap().count();
    assert_eq!(stored, 3);

    // A second upload for the same week conflicts.
    let (status, body) = send(&router, multipart_request("/api/progress", &token, &parts)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Listing returns the single entry.
    let (status, listed) = send(&router, get_request("/api/progress", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
