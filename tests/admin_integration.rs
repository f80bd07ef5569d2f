//! Admin API integration tests.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::{json, Value};

use common::{create_course, create_event, create_university, test_server};

// ============================================================================
// Courses
// ============================================================================

#[tokio::test]
async fn test_course_without_university_or_level_is_rejected() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;

    let response = server
        .post("/api/admin/courses")
        .json(&json!({ "name": "MSc AI", "level": "postgraduate" }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("university_id"));

    server
        .post("/api/admin/courses")
        .json(&json!({ "name": "MSc AI", "university_id": uni["id"] }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/admin/courses")
        .json(&json!({ "name": "MSc AI", "university_id": "missing", "level": "postgraduate" }))
        .await
        .assert_status_bad_request();

    let list: Value = server.get("/api/admin/courses").await.json();
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_course_campus_must_belong_to_university() {
    let (server, _pool) = test_server().await;
    let leeds = create_university(&server, "Leeds", "United Kingdom").await;
    let bath = create_university(&server, "Bath", "United Kingdom").await;

    let campus: Value = server
        .post(&format!("/api/admin/universities/{}/campuses", bath["id"].as_str().unwrap()))
        .json(&json!({ "name": "Claverton Down" }))
        .await
        .json();

    server
        .post("/api/admin/courses")
        .json(&json!({
            "name": "MSc AI",
            "university_id": leeds["id"],
            "campus_id": campus["id"],
            "level": "postgraduate",
        }))
        .await
        .assert_status_bad_request();

    let response = server
        .post("/api/admin/courses")
        .json(&json!({
            "name": "MSc AI",
            "university_id": bath["id"],
            "campus_id": campus["id"],
            "level": "postgraduate",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["campus_name"], "Claverton Down");
    assert_eq!(body["university_name"], "Bath");
}

#[tokio::test]
async fn test_course_update_is_partial() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let course = create_course(&server, uni["id"].as_str().unwrap(), "MSc AI", "postgraduate").await;
    let id = course["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/admin/courses/{}", id))
        .json(&json!({ "tuition_fee": 24500.0, "currency": "GBP" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "MSc AI");
    assert_eq!(body["level"], "postgraduate");
    assert_eq!(body["tuition_fee"], 24500.0);
    assert_eq!(body["currency"], "GBP");

    server
        .put(&format!("/api/admin/courses/{}", id))
        .json(&json!({ "name": "  " }))
        .await
        .assert_status_bad_request();

    server
        .put(&format!("/api/admin/courses/{}", id))
        .json(&json!({ "level": "nursery" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_course_update_trims_campus_id() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let uni_id = uni["id"].as_str().unwrap();
    let course = create_course(&server, uni_id, "MSc AI", "postgraduate").await;

    let campus: Value = server
        .post(&format!("/api/admin/universities/{}/campuses", uni_id))
        .json(&json!({ "name": "City Campus" }))
        .await
        .json();

    let response = server
        .put(&format!("/api/admin/courses/{}", course["id"].as_str().unwrap()))
        .json(&json!({
            "campus_id": format!("  {} ", campus["id"].as_str().unwrap()),
            "subject": "  Computing ",
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["campus_id"], campus["id"]);
    assert_eq!(body["campus_name"], "City Campus");
    assert_eq!(body["subject"], "Computing");
}

#[tokio::test]
async fn test_course_fee_cleared_with_null() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let course = create_course(&server, uni["id"].as_str().unwrap(), "MSc AI", "postgraduate").await;
    let path = format!("/api/admin/courses/{}", course["id"].as_str().unwrap());

    server
        .put(&path)
        .json(&json!({ "tuition_fee": 18000.0 }))
        .await
        .assert_status_ok();

    // Omitted fee is left alone
    let body: Value = server.put(&path).json(&json!({ "currency": "GBP" })).await.json();
    assert_eq!(body["tuition_fee"], 18000.0);

    let response = server.put(&path).json(&json!({ "tuition_fee": null })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["tuition_fee"].is_null());
    assert_eq!(body["currency"], "GBP");
}

#[tokio::test]
async fn test_delete_course_then_not_found() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let course = create_course(&server, uni["id"].as_str().unwrap(), "MSc AI", "postgraduate").await;
    let path = format!("/api/admin/courses/{}", course["id"].as_str().unwrap());

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status_not_found();
    server.delete(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_admin_course_pagination_totals() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let id = uni["id"].as_str().unwrap();
    for i in 0..7 {
        create_course(&server, id, &format!("Course {}", i), "diploma").await;
    }

    let body: Value = server
        .get("/api/admin/courses")
        .add_query_param("limit", 3)
        .add_query_param("page", 2)
        .await
        .json();

    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // Oversized limits are clamped
    let body: Value = server
        .get("/api/admin/courses")
        .add_query_param("limit", 5000)
        .await
        .json();
    assert_eq!(body["limit"], 100);
}

// ============================================================================
// Universities
// ============================================================================

#[tokio::test]
async fn test_university_slugs() {
    let (server, _pool) = test_server().await;

    let first = create_university(&server, "King's College", "United Kingdom").await;
    let second = create_university(&server, "King's College", "Canada").await;
    assert_eq!(first["slug"], "king-s-college");
    assert_eq!(second["slug"], "king-s-college-2");

    server
        .post("/api/admin/universities")
        .json(&json!({ "name": "Bad", "country": "UK", "slug": "Not A Slug" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/admin/universities")
        .json(&json!({ "name": "Dup", "country": "UK", "slug": "king-s-college" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_university_ranking_cleared_with_null() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let path = format!("/api/admin/universities/{}", uni["id"].as_str().unwrap());

    let body: Value = server.put(&path).json(&json!({ "ranking": 82 })).await.json();
    assert_eq!(body["ranking"], 82);

    let body: Value = server.put(&path).json(&json!({ "city": " Leeds " })).await.json();
    assert_eq!(body["ranking"], 82);
    assert_eq!(body["city"], "Leeds");

    let response = server.put(&path).json(&json!({ "ranking": null })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["ranking"].is_null());

    server
        .put(&path)
        .json(&json!({ "ranking": 0 }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_deleting_university_cascades() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let id = uni["id"].as_str().unwrap();
    create_course(&server, id, "MSc AI", "postgraduate").await;

    let scholarship: Value = server
        .post("/api/admin/scholarships")
        .json(&json!({
            "title": "Leeds Excellence Award",
            "university_id": id,
            "deadline": "2027-03-31",
        }))
        .await
        .json();

    server
        .delete(&format!("/api/admin/universities/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let courses: Value = server.get("/api/admin/courses").await.json();
    assert_eq!(courses["total"], 0);

    let kept: Value = server
        .get(&format!("/api/admin/scholarships/{}", scholarship["id"].as_str().unwrap()))
        .await
        .json();
    assert_eq!(kept["university_id"], Value::Null);
    assert_eq!(kept["deadline"], "2027-03-31");
}

#[tokio::test]
async fn test_campus_routes() {
    let (server, _pool) = test_server().await;
    let uni = create_university(&server, "Leeds", "United Kingdom").await;
    let campuses_path = format!("/api/admin/universities/{}/campuses", uni["id"].as_str().unwrap());

    let campus: Value = server
        .post(&campuses_path)
        .json(&json!({ "name": "City Campus" }))
        .await
        .json();
    let campus_path = format!("/api/admin/campuses/{}", campus["id"].as_str().unwrap());

    let updated: Value = server
        .put(&campus_path)
        .json(&json!({ "city": "Leeds" }))
        .await
        .json();
    assert_eq!(updated["name"], "City Campus");
    assert_eq!(updated["city"], "Leeds");

    server.delete(&campus_path).await.assert_status(StatusCode::NO_CONTENT);
    let list: Value = server.get(&campuses_path).await.json();
    assert_eq!(list, json!([]));

    server
        .get("/api/admin/universities/missing/campuses")
        .await
        .assert_status_not_found();
}

// ============================================================================
// Scholarships
// ============================================================================

async fn create_scholarship(server: &axum_test::TestServer, title: &str, level: &str) -> Value {
    let response = server
        .post("/api/admin/scholarships")
        .json(&json!({ "title": title, "level": level }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_scholarship_level_is_a_known_level() {
    let (server, _pool) = test_server().await;

    server
        .post("/api/admin/scholarships")
        .json(&json!({ "title": "Early Years Award", "level": "kindergarten" }))
        .await
        .assert_status_bad_request();

    let grant = create_scholarship(&server, "Chevening", "Masters").await;
    assert_eq!(grant["level"], "postgraduate");

    server
        .put(&format!("/api/admin/scholarships/{}", grant["id"].as_str().unwrap()))
        .json(&json!({ "level": "kindergarten" }))
        .await
        .assert_status_bad_request();

    let list: Value = server.get("/api/admin/scholarships").await.json();
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_scholarship_level_filter() {
    let (server, _pool) = test_server().await;
    create_scholarship(&server, "Chevening", "postgraduate").await;
    create_scholarship(&server, "Global Wales", "undergraduate").await;

    let all: Value = server
        .get("/api/scholarships")
        .add_query_param("level", "all")
        .await
        .json();
    assert_eq!(all["total"], 2);

    let masters: Value = server
        .get("/api/scholarships")
        .add_query_param("level", "masters")
        .await
        .json();
    assert_eq!(masters["total"], 1);
    assert_eq!(masters["data"][0]["title"], "Chevening");
    assert_eq!(masters["data"][0]["level"], "postgraduate");

    server
        .get("/api/scholarships")
        .add_query_param("level", "kindergarten")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_scholarship_deadline_cleared_with_null() {
    let (server, _pool) = test_server().await;
    let grant = create_scholarship(&server, "Chevening", "postgraduate").await;
    let path = format!("/api/admin/scholarships/{}", grant["id"].as_str().unwrap());

    let body: Value = server
        .put(&path)
        .json(&json!({ "deadline": "2025-11-05" }))
        .await
        .json();
    assert_eq!(body["deadline"], "2025-11-05");

    let body: Value = server.put(&path).json(&json!({ "deadline": null })).await.json();
    assert!(body["deadline"].is_null());
    assert_eq!(body["level"], "postgraduate");
}

// ============================================================================
// Inbox
// ============================================================================

async fn submit_message(server: &axum_test::TestServer, name: &str) -> Value {
    server
        .post("/api/contact")
        .json(&json!({ "name": name, "email": "someone@example.com", "message": "Hello" }))
        .await
        .json()
}

#[tokio::test]
async fn test_message_review_and_status_filter() {
    let (server, _pool) = test_server().await;
    let first = submit_message(&server, "Ada").await;
    submit_message(&server, "Grace").await;

    let response = server
        .put(&format!("/api/admin/messages/{}", first["id"].as_str().unwrap()))
        .json(&json!({ "status": "replied", "admin_notes": "Sent brochure" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "replied");
    assert_eq!(body["admin_notes"], "Sent brochure");

    let unread: Value = server
        .get("/api/admin/messages")
        .add_query_param("status", "unread")
        .await
        .json();
    assert_eq!(unread["total"], 1);
    assert_eq!(unread["data"][0]["name"], "Grace");

    let all: Value = server
        .get("/api/admin/messages")
        .add_query_param("status", "all")
        .await
        .json();
    assert_eq!(all["total"], 2);

    server
        .get("/api/admin/messages")
        .add_query_param("status", "spam")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_application_notes_keep_status() {
    let (server, _pool) = test_server().await;
    let application: Value = server
        .post("/api/applications")
        .json(&json!({ "full_name": "Kemi Ade", "email": "kemi@example.com" }))
        .await
        .json();
    let path = format!("/api/admin/applications/{}", application["id"].as_str().unwrap());

    let body: Value = server
        .put(&path)
        .json(&json!({ "admin_notes": "Awaiting transcript" }))
        .await
        .json();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["admin_notes"], "Awaiting transcript");

    let body: Value = server
        .put(&path)
        .json(&json!({ "status": "accepted" }))
        .await
        .json();
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["admin_notes"], "Awaiting transcript");

    server
        .put(&path)
        .json(&json!({ "status": "hired" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_job_applications_filter_by_position_and_search() {
    let (server, _pool) = test_server().await;
    for (name, position) in [("Sam", "Counsellor"), ("Lee", "Marketing Lead"), ("Ola", "Counsellor")] {
        server
            .post("/api/careers/apply")
            .json(&json!({
                "full_name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "position": position,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server
        .get("/api/admin/job-applications")
        .add_query_param("position", "Counsellor")
        .await
        .json();
    assert_eq!(body["total"], 2);

    let body: Value = server
        .get("/api/admin/job-applications")
        .add_query_param("q", "ola@")
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["full_name"], "Ola");
}

#[tokio::test]
async fn test_delete_message_is_idempotent_404() {
    let (server, _pool) = test_server().await;
    let message = submit_message(&server, "Ada").await;
    let path = format!("/api/admin/messages/{}", message["id"].as_str().unwrap());

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status_not_found();
    server
        .put(&path)
        .json(&json!({ "status": "read" }))
        .await
        .assert_status_not_found();
}

// ============================================================================
// Announcements and events
// ============================================================================

#[tokio::test]
async fn test_announcement_partial_update() {
    let (server, _pool) = test_server().await;
    let created: Value = server
        .post("/api/admin/announcements")
        .json(&json!({ "title": "Visa update", "content": "New rules" }))
        .await
        .json();
    assert_eq!(created["announcement_type"], "news");
    assert_eq!(created["is_published"], false);
    let path = format!("/api/admin/announcements/{}", created["id"].as_str().unwrap());

    let body: Value = server
        .put(&path)
        .json(&json!({ "is_published": true, "announcement_type": "alert" }))
        .await
        .json();
    assert_eq!(body["title"], "Visa update");
    assert_eq!(body["is_published"], true);
    assert_eq!(body["announcement_type"], "alert");

    server
        .put(&path)
        .json(&json!({ "title": "" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_admin_events_newest_first() {
    let (server, _pool) = test_server().await;
    let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    create_event(&server, "Spring fair", date("2026-03-14")).await;
    create_event(&server, "Autumn fair", date("2026-10-03")).await;
    create_event(&server, "Summer webinar", date("2026-07-01")).await;

    let body: Value = server
        .get("/api/admin/events")
        .add_query_param("limit", 2)
        .await
        .json();

    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][0]["title"], "Autumn fair");
    assert_eq!(body["data"][1]["title"], "Summer webinar");

    let body: Value = server
        .get("/api/admin/events")
        .add_query_param("search", "fair")
        .await
        .json();
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_event_requires_date() {
    let (server, _pool) = test_server().await;

    server
        .post("/api/admin/events")
        .json(&json!({ "title": "Open day" }))
        .await
        .assert_status_bad_request();

    server
        .put("/api/admin/events/missing")
        .json(&json!({ "title": "Open day" }))
        .await
        .assert_status_not_found();
}
