//! Application state for Unibridge.
//!
//! Contains the shared state that is passed to all handlers.

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::{PaginationConfig, SearchConfig};
use crate::db::DbPool;
use crate::services::{EventService, SearchService};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Page size bounds for list endpoints.
    pub pagination: PaginationConfig,
    /// Event calendar service.
    pub events: EventService,
    /// Catalog search service.
    pub search: SearchService,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create the application state from global configuration,
    /// opening the database and applying the schema.
    pub async fn new(metrics: Option<PrometheusHandle>) -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path).await?;
        crate::db::initialize_schema(&db).await?;

        Ok(Self::with_pool(db, config.pagination, config.search).with_metrics(metrics))
    }

    /// Build state around an existing pool.
    pub fn with_pool(db: DbPool, pagination: PaginationConfig, search: SearchConfig) -> Self {
        Self {
            events: EventService::new(db.clone()),
            search: SearchService::new(db.clone(), search.result_limit),
            db,
            pagination,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}
