use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::cookies::session_token;
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::services::AuthService;
use crate::shared::templates::render_page;

#[derive(Serialize)]
struct LoginPageContext<'a> {
    error: Option<&'a str>,
    username: &'a str,
}

fn render_login(status: StatusCode, error: Option<&str>, username: &str) -> Response {
    match render_page("login.html.jinja", &LoginPageContext { error, username }) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(e.to_string()).into_response(),
    }
}

/// GET /login
pub async fn login_page(State(service): State<Arc<AuthService>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if service.validate_session(&token).await.is_some() {
            return Redirect::to("/").into_response();
        }
    }
    render_login(StatusCode::OK, None, "")
}

/// POST /login (form)
pub async fn login_submit(
    State(service): State<Arc<AuthService>>,
    Form(form): Form<LoginRequestDto>,
) -> Response {
    if form.validate().is_err() {
        return render_login(
            StatusCode::BAD_REQUEST,
            Some("Enter both username and password."),
            &form.username,
        );
    }

    match service.login(&form.username, &form.password).await {
        Ok(session) => (
            AppendHeaders([(header::SET_COOKIE, service.session_cookie(&session))]),
            Redirect::to("/"),
        )
            .into_response(),
        Err(AppError::Unauthorized(message)) => {
            render_login(StatusCode::UNAUTHORIZED, Some(message.as_str()), &form.username)
        }
        Err(e) => e.into_response(),
    }
}

/// POST /logout
pub async fn logout_submit(State(service): State<Arc<AuthService>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        service.logout(&token).await;
    }
    (
        AppendHeaders([(header::SET_COOKIE, service.clear_cookie())]),
        Redirect::to("/login"),
    )
        .into_response()
}
