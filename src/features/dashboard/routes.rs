use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers::{self, page_handler};
use crate::features::dashboard::services::DashboardService;

/// Dashboard JSON API (wrap with the session middleware)
pub fn api_routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(dashboard_service)
}

/// Server-rendered dashboard page (wrap with the page session middleware)
pub fn page_routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/", get(page_handler::dashboard_page))
        .with_state(dashboard_service)
}
