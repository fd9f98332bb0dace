use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::shared::constants::SESSION_COOKIE_NAME;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_session,
        // Dashboard (protected)
        dashboard_handlers::get_dashboard,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::SessionResponseDto,
            ApiResponse<auth_dtos::SessionResponseDto>,
            // Dashboard
            dashboard_dtos::MapCenterDto,
            dashboard_dtos::MapMarkerDto,
            dashboard_dtos::MapViewDto,
            dashboard_dtos::TrainerRowDto,
            dashboard_dtos::DashboardViewDto,
            ApiResponse<dashboard_dtos::DashboardViewDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin login and session management"),
        (name = "Dashboard", description = "Trainer locations grouped by Indian state"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Trainer Locator API",
        version = "0.1.0",
        description = "API documentation for the trainer location dashboard",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
