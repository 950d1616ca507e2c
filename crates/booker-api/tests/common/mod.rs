//! Shared helpers for the HTTP tests.
//!
//! Every test gets a fresh in-memory store and a manual clock, so deadlines
//! can be crossed without sleeping.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use booker_api::{AppState, build_app};
use booker_core::config::AppConfig;
use booker_core::traits::ManualClock;
use booker_database::Stores;
use booker_notify::NotificationDispatcher;

/// The instant every test app starts at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
}

/// A router plus the clock it reads.
pub struct TestApp {
    pub router: Router,
    pub clock: ManualClock,
}

/// Build the full application over a memory backend with notifications off.
pub fn build_test_app() -> TestApp {
    let config = AppConfig::from_toml(
        r#"
        [database]
        url = "memory://"

        [reconciler]
        enabled = false
        "#,
    )
    .expect("test config parses");
    let clock = ManualClock::new(start_time());
    let stores = Stores::memory(Arc::new(clock.clone()));
    let state = AppState::new(
        Arc::new(config),
        stores,
        NotificationDispatcher::disabled(),
        Arc::new(clock.clone()),
    );

    TestApp {
        router: build_app(state),
        clock,
    }
}

/// Send a GET request.
pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status and JSON body of a response.
pub async fn status_and_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    (status, body_json(response).await)
}

/// Register a user and return its JSON.
pub async fn create_user(app: &TestApp, name: &str, email: &str) -> Value {
    let response = post_json(
        app,
        "/api/users",
        serde_json::json!({ "name": name, "email": email }),
    )
    .await;
    let (status, json) = status_and_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["user"].clone()
}

/// Create an event on 2030-06-01 and return its id.
pub async fn create_event(
    app: &TestApp,
    total_seats: i32,
    lifetime_minutes: i32,
    requires_payment: bool,
) -> String {
    let response = post_json(
        app,
        "/api/events",
        serde_json::json!({
            "name": "Rust Conf",
            "date": "2030-06-01T18:00:00Z",
            "total_seats": total_seats,
            "booking_lifetime_hours": lifetime_minutes / 60,
            "booking_lifetime_minutes": lifetime_minutes % 60,
            "requires_payment_confirmation": requires_payment,
        }),
    )
    .await;
    let (status, json) = status_and_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["event"]["id"].as_str().unwrap().to_string()
}
