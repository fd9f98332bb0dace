use std::sync::Arc;

use crate::core::config::{AdminConfig, SessionConfig};
use crate::core::error::{AppError, Result};
use crate::features::auth::cookies;
use crate::features::auth::model::AdminSession;
use crate::features::auth::services::SessionStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Shared-secret gate in front of the dashboard
pub struct AuthService {
    admin: AdminConfig,
    session_config: SessionConfig,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(admin: AdminConfig, session_config: SessionConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            admin,
            session_config,
            sessions,
        }
    }

    /// Check the credential pair and open a session on match
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession> {
        if username != self.admin.username || password != self.admin.password {
            tracing::warn!("Rejected admin login for username {:?}", username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let session = self.sessions.create(username).await;
        tracing::info!("Admin {} logged in", username);
        Ok(session)
    }

    pub async fn logout(&self, token: &str) {
        if self.sessions.remove(token).await {
            tracing::info!("Admin session closed");
        }
    }

    pub async fn validate_session(&self, token: &str) -> Option<AdminSession> {
        self.sessions.get(token).await
    }

    pub fn session_cookie(&self, session: &AdminSession) -> String {
        cookies::session_cookie(
            &session.token,
            self.session_config.ttl,
            self.session_config.cookie_secure,
        )
    }

    pub fn clear_cookie(&self) -> String {
        cookies::clear_session_cookie(self.session_config.cookie_secure)
    }
}
