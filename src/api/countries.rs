//! Country Routes (public)
//!
//! - GET /api/countries - Countries with at least one university

use axum::{extract::State, routing::get, Json, Router};

use crate::db::{self, CountrySummary};
use crate::{AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_countries))
}

async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<CountrySummary>>> {
    Ok(Json(db::list_countries(&state.db).await?))
}
