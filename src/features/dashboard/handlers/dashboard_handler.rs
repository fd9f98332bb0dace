use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::{ApiResponse, Meta};

/// Get the dashboard view for a region: map framing, markers, boundary and table
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQueryParams),
    responses(
        (status = 200, description = "Dashboard view", body = ApiResponse<DashboardViewDto>),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "Trainer data source unavailable")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<ApiResponse<DashboardViewDto>>, AppError> {
    let view = service.get_view(params.selected_region()).await?;
    let total = view.trainers.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(view),
        None,
        Some(Meta { total }),
    )))
}
