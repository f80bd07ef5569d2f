//! Public Form Submissions
//!
//! Routes:
//! - POST /api/contact - Contact form message
//! - POST /api/applications - Study application
//! - POST /api/careers/apply - Job application

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::db::{self, Application, JobApplication, Message};
use crate::models::new_id;
use crate::services::validation::{email, optional, required};
use crate::{metrics, AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/applications", post(submit_application))
        .route("/careers/apply", post(submit_job_application))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub university_id: Option<String>,
    pub course_id: Option<String>,
    pub intake: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobApplicationRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/contact
async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Message>)> {
    let input = db::CreateMessage {
        id: new_id(),
        name: required("name", request.name.as_deref())?,
        email: email(request.email.as_deref())?,
        phone: optional(request.phone),
        subject: optional(request.subject),
        message: required("message", request.message.as_deref())?,
    };

    let message = db::create_message(&state.db, input).await?;
    metrics::record_submission("contact");
    info!(id = %message.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /api/applications
async fn submit_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<Application>)> {
    let university_id = optional(request.university_id);
    let course_id = optional(request.course_id);

    // A chosen course must exist and, if a university was also chosen,
    // belong to it.
    if let Some(course_id) = &course_id {
        let course = db::get_course(&state.db, course_id).await.map_err(|e| match e {
            Error::NotFound(_) => Error::Validation(format!("Course does not exist: {}", course_id)),
            other => other,
        })?;
        if let Some(university_id) = &university_id {
            if &course.university_id != university_id {
                return Err(Error::Validation(
                    "Selected course is not offered by the selected university".into(),
                ));
            }
        }
    }

    let input = db::CreateApplication {
        id: new_id(),
        full_name: required("full_name", request.full_name.as_deref())?,
        email: email(request.email.as_deref())?,
        phone: optional(request.phone),
        nationality: optional(request.nationality),
        university_id,
        course_id,
        intake: optional(request.intake),
        message: optional(request.message),
    };

    let application = db::create_application(&state.db, input).await?;
    metrics::record_submission("application");
    info!(id = %application.id, "Study application received");

    Ok((StatusCode::CREATED, Json(application)))
}

/// POST /api/careers/apply
async fn submit_job_application(
    State(state): State<AppState>,
    Json(request): Json<JobApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>)> {
    let input = db::CreateJobApplication {
        id: new_id(),
        full_name: required("full_name", request.full_name.as_deref())?,
        email: email(request.email.as_deref())?,
        phone: optional(request.phone),
        position: required("position", request.position.as_deref())?,
        cover_letter: optional(request.cover_letter),
        resume_url: optional(request.resume_url),
    };

    let application = db::create_job_application(&state.db, input).await?;
    metrics::record_submission("job_application");
    info!(id = %application.id, position = %application.position, "Job application received");

    Ok((StatusCode::CREATED, Json(application)))
}
