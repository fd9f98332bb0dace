use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AdminSession;

/// Request DTO for admin login (JSON body or HTML form)
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    // Missing fields deserialize empty so validation reports them
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Current admin session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for SessionResponseDto {
    fn from(session: AdminSession) -> Self {
        Self {
            username: session.username,
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }
}
