mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, SessionStore};
use crate::features::dashboard::{routes as dashboard_routes, BoundaryService, DashboardService};
use crate::features::geocoding::LocationResolver;
use crate::features::trainers::{EnrichmentService, FirebaseTrainerSource};
use crate::modules::firebase::FirebaseRealtimeClient;
use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Trainer records
    let firebase_client = Arc::new(
        FirebaseRealtimeClient::new(&config.firebase)
            .map_err(|e| anyhow::anyhow!("Failed to create Firebase client: {}", e))?,
    );
    let trainer_source = Arc::new(FirebaseTrainerSource::new(
        firebase_client,
        config.firebase.trainers_path.clone(),
    ));
    tracing::info!(
        "Firebase trainer source initialized (path: {})",
        config.firebase.trainers_path
    );

    // Reverse geocoding
    let resolver = Arc::new(
        LocationResolver::from_config(&config.geocoding)
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding: {}", e))?,
    );
    tracing::info!(
        "Location resolver initialized (providers: {})",
        resolver.provider_names().join(" -> ")
    );

    let enrichment_service = Arc::new(EnrichmentService::new(trainer_source, resolver));

    // Dashboard
    let boundary_service = Arc::new(BoundaryService::from_config(&config.boundary));
    let dashboard_service = Arc::new(DashboardService::new(
        enrichment_service,
        boundary_service,
    ));
    tracing::info!(
        "Dashboard service initialized (boundaries: {})",
        config.boundary.file
    );

    // Admin sessions
    let session_store = Arc::new(SessionStore::new(config.session.ttl));
    let auth_service = Arc::new(AuthService::new(
        config.admin.clone(),
        config.session.clone(),
        session_store,
    ));
    tracing::info!("Auth service initialized for admin '{}'", config.admin.username);

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(app_routes(auth_service, dashboard_service))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Every application route, with the session gates applied
fn app_routes(auth_service: Arc<AuthService>, dashboard_service: Arc<DashboardService>) -> Router {
    // JSON API (401 without a session)
    let protected_api = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(dashboard_routes::api_routes(Arc::clone(&dashboard_service)))
        .route_layer(from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::session_middleware,
        ));

    // HTML pages (redirect to /login without a session)
    let protected_pages = dashboard_routes::page_routes(dashboard_service).route_layer(
        from_fn_with_state(Arc::clone(&auth_service), middleware::page_session_middleware),
    );

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(protected_api)
        .merge(protected_pages)
        .merge(auth_routes::public_routes(auth_service))
        .merge(health_route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AdminConfig, SessionConfig};
    use crate::features::auth::services::INVALID_CREDENTIALS;
    use crate::features::dashboard::dtos::DashboardViewDto;
    use crate::features::trainers::models::RawTrainerRecord;
    use crate::features::trainers::sources::{parse_snapshot, SourceError, TrainerSource};
    use crate::shared::types::ApiResponse;
    use async_trait::async_trait;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::time::Duration;

    struct StaticSource(Value);

    #[async_trait]
    impl TrainerSource for StaticSource {
        async fn fetch_trainers(&self) -> Result<BTreeMap<String, RawTrainerRecord>, SourceError> {
            parse_snapshot(self.0.clone())
        }
    }

    fn test_server() -> TestServer {
        let source = StaticSource(json!({
            "9999999999": { "latitude": 28.6, "longitude": 77.2, "name": "A", "timestamp": "t1" }
        }));
        // No providers: every trainer resolves to "Unknown"
        let resolver = LocationResolver::new(Vec::new());
        let enrichment = EnrichmentService::new(Arc::new(source), Arc::new(resolver));
        let dashboard = Arc::new(DashboardService::new(
            Arc::new(enrichment),
            Arc::new(BoundaryService::new("/nonexistent.geojson", "ST_NM")),
        ));
        let auth = Arc::new(AuthService::new(
            AdminConfig {
                username: "admin".to_string(),
                password: "secret".to_string(),
            },
            SessionConfig {
                ttl: Duration::from_secs(3600),
                cookie_secure: false,
            },
            Arc::new(SessionStore::new(Duration::from_secs(3600))),
        ));
        TestServer::new(app_routes(auth, dashboard)).unwrap()
    }

    /// Logs in through the JSON API and returns the `Cookie` header value
    async fn login_cookie(server: &TestServer) -> HeaderValue {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": "admin", "password": "secret" }))
            .await;
        response.assert_status_ok();

        let set_cookie = response.header(header::SET_COOKIE);
        let pair = set_cookie
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        HeaderValue::from_str(&pair).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let server = test_server();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_dashboard_api_requires_session() {
        let server = test_server();
        server
            .get("/api/dashboard")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let server = test_server();
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": "admin", "password": "nope" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_then_dashboard_then_logout() {
        let server = test_server();
        let cookie = login_cookie(&server).await;

        let response = server
            .get("/api/dashboard")
            .add_query_param("region", "All")
            .add_header(header::COOKIE, cookie.clone())
            .await;
        response.assert_status_ok();
        let body: ApiResponse<DashboardViewDto> = response.json();
        let view = body.data.unwrap();
        assert_eq!(view.selected_region, "All");
        assert_eq!(view.regions, vec!["All", "Unknown"]);
        assert_eq!(view.trainers.len(), 1);
        assert_eq!(view.trainers[0].region, "Unknown");

        server
            .get("/api/auth/session")
            .add_header(header::COOKIE, cookie.clone())
            .await
            .assert_status_ok();

        server
            .post("/api/auth/logout")
            .add_header(header::COOKIE, cookie.clone())
            .await
            .assert_status_ok();

        server
            .get("/api/dashboard")
            .add_header(header::COOKIE, cookie)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_page_redirects_to_login() {
        let server = test_server();
        let response = server.get("/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
    }

    #[tokio::test]
    async fn test_dashboard_page_renders_table_for_session() {
        let server = test_server();
        let cookie = login_cookie(&server).await;

        let response = server.get("/").add_header(header::COOKIE, cookie).await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("9999999999"));
        assert!(html.contains("Trainer Details"));
    }

    #[tokio::test]
    async fn test_dashboard_page_keeps_stale_region_selected() {
        let server = test_server();
        let cookie = login_cookie(&server).await;

        let response = server
            .get("/")
            .add_query_param("region", "Maharashtra")
            .add_header(header::COOKIE, cookie)
            .await;
        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains(r#"<option value="Maharashtra" selected>"#));
        assert!(!html.contains(r#"<option value="All" selected>"#));
        assert!(html.contains("Showing 0 of 1 trainers"));
    }

    #[tokio::test]
    async fn test_login_form_with_missing_field_shows_login_page() {
        let server = test_server();
        let response = server
            .post("/login")
            .form(&json!({ "username": "admin" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let html = response.text();
        assert!(html.contains("Enter both username and password."));
        assert!(html.contains(r#"value="admin""#));
    }

    #[tokio::test]
    async fn test_login_form_sets_cookie_and_redirects() {
        let server = test_server();
        let response = server
            .post("/login")
            .form(&json!({ "username": "admin", "password": "secret" }))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert!(response
            .header(header::SET_COOKIE)
            .to_str()
            .unwrap()
            .starts_with("trainer_session="));
    }

    #[tokio::test]
    async fn test_login_form_shows_error_on_bad_credentials() {
        let server = test_server();
        let response = server
            .post("/login")
            .form(&json!({ "username": "admin", "password": "wrong" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.text().contains(INVALID_CREDENTIALS));
    }
}
