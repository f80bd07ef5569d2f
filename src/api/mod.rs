//! API Routes for Unibridge
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain: public catalog reads and form
//! submissions under `/api`, back-office management under `/api/admin`.

mod admin;
mod announcements;
mod countries;
mod courses;
mod events;
mod scholarships;
mod search;
pub mod status;
mod submissions;
mod universities;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::models::{non_empty, Page};
use crate::{AppState, Error, Result};

/// Deadline for any single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Form submissions are small JSON bodies
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The served application: all routes, the state and the middleware stack.
///
/// The timeout sits inside the body limit so it wraps the plain router
/// response.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}

/// CORS for the public site and dashboard. No configured origins means any.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Build the complete API router.
///
/// Route structure:
/// - /health, /health/ready, /metrics - Status (public)
/// - /api/* - Public catalog, search and submissions
/// - /api/admin/* - Back-office CRUD
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/api", public_routes())
        .nest("/api/admin", admin::routes())
}

/// Routes used by the public site.
fn public_routes() -> Router<AppState> {
    Router::new()
        .nest("/universities", universities::routes())
        .nest("/courses", courses::routes())
        .nest("/scholarships", scholarships::routes())
        .nest("/events", events::routes())
        .nest("/countries", countries::routes())
        .nest("/announcements", announcements::routes())
        .merge(search::routes())
        .merge(submissions::routes())
}

// ============================================================================
// Shared query types
// ============================================================================

/// Query parameters common to inbox-style lists.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Free-text search (`search` or `q`)
    #[serde(alias = "q")]
    pub search: Option<String>,
    /// Status filter; blank or `all` means no filter
    pub status: Option<String>,
}

impl ListQuery {
    pub fn page(&self, state: &AppState) -> Page {
        Page::resolve(self.page, self.limit, &state.pagination)
    }

    pub fn search_term(&self) -> Option<String> {
        non_empty(&self.search).map(str::to_string)
    }
}

/// Parse an optional enum filter from the query string.
///
/// Blank and `all` mean "no filter"; anything else must parse.
pub(crate) fn parse_filter<T>(
    field: &str,
    value: &Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match non_empty(value) {
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        _ => parse_field(field, value, parse),
    }
}

/// Parse an optional enum field from a request body.
///
/// Blank means unset; `all` is not special here.
pub(crate) fn parse_field<T>(
    field: &str,
    value: &Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => parse(v)
            .map(Some)
            .ok_or_else(|| Error::Validation(format!("Unknown {}: {}", field, v))),
    }
}
