use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::AdminSession;
use crate::features::dashboard::dtos::{DashboardQueryParams, DashboardViewDto};
use crate::features::dashboard::services::DashboardService;
use crate::shared::templates::render_page;

#[derive(Serialize)]
struct DashboardPageContext<'a> {
    username: &'a str,
    selected_region: &'a str,
    view: Option<&'a DashboardViewDto>,
    /// JSON for the map script, embedded in a `<script type="application/json">`
    map_json: String,
    error: Option<String>,
}

fn render_dashboard(status: StatusCode, ctx: &DashboardPageContext<'_>) -> Response {
    match render_page("dashboard.html.jinja", ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(e.to_string()).into_response(),
    }
}

/// Script data must not be able to close the surrounding `<script>` element
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(value).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// GET / - the dashboard page
pub async fn dashboard_page(
    State(service): State<Arc<DashboardService>>,
    session: AdminSession,
    Query(params): Query<DashboardQueryParams>,
) -> Response {
    let selected_region = params.selected_region();

    match service.get_view(selected_region).await {
        Ok(view) => {
            let map_json = match script_safe_json(&view.map) {
                Ok(json) => json,
                Err(e) => return e.into_response(),
            };
            render_dashboard(
                StatusCode::OK,
                &DashboardPageContext {
                    username: &session.username,
                    selected_region,
                    view: Some(&view),
                    map_json,
                    error: None,
                },
            )
        }
        Err(e) => {
            tracing::error!("Dashboard render failed: {}", e);
            render_dashboard(
                StatusCode::BAD_GATEWAY,
                &DashboardPageContext {
                    username: &session.username,
                    selected_region,
                    view: None,
                    map_json: "null".to_string(),
                    error: Some("Trainer data is temporarily unavailable. Please retry.".to_string()),
                },
            )
        }
    }
}
