//! Admin Routes
//!
//! Back-office management for the dashboard. Each resource exposes
//! list/detail plus the mutations the dashboard performs on it.
//!
//! These routes carry no authentication of their own; deployments put
//! them behind the site's authenticating gateway.

mod announcements;
mod courses;
mod events;
mod inbox;
mod scholarships;
mod universities;

use axum::Router;

use crate::AppState;

/// Build admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/announcements", announcements::routes())
        .nest("/courses", courses::routes())
        .nest("/scholarships", scholarships::routes())
        .nest("/events", events::routes())
        .merge(universities::routes())
        .merge(inbox::routes())
}
