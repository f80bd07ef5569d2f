//! Shared setup for the HTTP integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use unibridge::api;
use unibridge::config::{PaginationConfig, SearchConfig};
use unibridge::db::{self, DbPool};
use unibridge::AppState;

/// Test server over a fresh in-memory database, with the same
/// middleware stack the binary serves.
pub async fn test_server() -> (TestServer, DbPool) {
    test_server_with_origins(&[]).await
}

pub async fn test_server_with_origins(cors_origins: &[String]) -> (TestServer, DbPool) {
    let pool = db::init_in_memory()
        .await
        .expect("Failed to create test database");

    let state = AppState::with_pool(
        pool.clone(),
        PaginationConfig::default(),
        SearchConfig::default(),
    );
    let app = api::app(state, cors_origins);

    let server = TestServer::new(app).expect("Failed to create test server");
    (server, pool)
}

pub async fn create_university(server: &TestServer, name: &str, country: &str) -> Value {
    let response = server
        .post("/api/admin/universities")
        .json(&json!({ "name": name, "country": country }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_course(server: &TestServer, university_id: &str, name: &str, level: &str) -> Value {
    let response = server
        .post("/api/admin/courses")
        .json(&json!({
            "name": name,
            "university_id": university_id,
            "level": level,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_event(server: &TestServer, title: &str, date: chrono::NaiveDate) -> Value {
    let response = server
        .post("/api/admin/events")
        .json(&json!({ "title": title, "event_date": date }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
