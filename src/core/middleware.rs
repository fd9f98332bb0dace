use crate::core::error::AppError;
use crate::features::auth::cookies::session_token;
use crate::features::auth::AuthService;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let mut response = Response::new(Body::from("Unauthorized"));
            *response.status_mut() = StatusCode::UNAUTHORIZED;
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Swagger UI\""),
            );

            Err(response)
        })
    }
}

/// Requires an admin session for API routes; answers 401 otherwise
pub async fn session_middleware(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?;

    let session = auth
        .validate_session(&token)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or invalid".to_string()))?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Requires an admin session for HTML pages; redirects to the login page otherwise
pub async fn page_session_middleware(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match session_token(req.headers()) {
        Some(token) => auth.validate_session(&token).await,
        None => None,
    };

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn, routing::get, Router};
    use axum_test::TestServer;

    fn swagger_like_router() -> Router {
        Router::new()
            .route("/docs", get(|| async { "docs" }))
            .layer(from_fn(basic_auth_middleware(Arc::new(
                "docs:secret".to_string(),
            ))))
    }

    #[tokio::test]
    async fn test_basic_auth_rejects_missing_credentials() {
        let server = TestServer::new(swagger_like_router()).unwrap();

        let response = server.get("/docs").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.header(header::WWW_AUTHENTICATE),
            HeaderValue::from_static("Basic realm=\"Swagger UI\"")
        );
    }

    #[tokio::test]
    async fn test_basic_auth_accepts_valid_credentials() {
        let server = TestServer::new(swagger_like_router()).unwrap();
        let encoded = BASE64_STANDARD.encode("docs:secret");

        let response = server
            .get("/docs")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
            )
            .await;
        response.assert_status_ok();
        response.assert_text("docs");
    }
}
