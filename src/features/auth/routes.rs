use crate::features::auth::handlers::{self, login_page_handler};
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route(
            "/login",
            get(login_page_handler::login_page).post(login_page_handler::login_submit),
        )
        .route("/logout", post(login_page_handler::logout_submit))
        .with_state(service)
}

/// Protected auth routes (require an admin session)
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/session", get(handlers::get_session))
}
