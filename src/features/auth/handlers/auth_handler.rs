use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::cookies::session_token;
use crate::features::auth::dtos::{LoginRequestDto, SessionResponseDto};
use crate::features::auth::model::AdminSession;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Login with the shared admin credentials
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = ApiResponse<SessionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(&dto.username, &dto.password).await?;
    let cookie = service.session_cookie(&session);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success(
            Some(SessionResponseDto::from(session)),
            Some("Login successful".to_string()),
            None,
        )),
    ))
}

/// Close the current session, if any
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session closed and cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        service.logout(&token).await;
    }

    (
        AppendHeaders([(header::SET_COOKIE, service.clear_cookie())]),
        Json(ApiResponse::<()>::success(
            None,
            Some("Logged out".to_string()),
            None,
        )),
    )
}

/// Get the current admin session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "Not logged in")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_session(session: AdminSession) -> Json<ApiResponse<SessionResponseDto>> {
    Json(ApiResponse::success(Some(session.into()), None, None))
}
