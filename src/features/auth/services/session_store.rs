use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::auth::model::AdminSession;

/// In-memory admin sessions keyed by random token
pub struct SessionStore {
    sessions: RwLock<HashMap<String, AdminSession>>,
    ttl: TimeDelta,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub async fn create(&self, username: &str) -> AdminSession {
        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: now,
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired_at(now));
        sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Live session for `token`; expired sessions are removed on sight
    pub async fn get(&self, token: &str) -> Option<AdminSession> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired_at(now) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.sessions.write().await.remove(token);
        None
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
