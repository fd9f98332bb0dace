use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::FirebaseConfig;

#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("Firebase request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Firebase returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode Firebase response: {0}")]
    Decode(String),
}

/// Read-only client for a Firebase Realtime Database
pub struct FirebaseRealtimeClient {
    client: Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseRealtimeClient {
    pub fn new(config: &FirebaseConfig) -> Result<Self, FirebaseError> {
        let client = Client::builder()
            .user_agent(concat!("TrainerLocator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            database_url: config.database_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Build the REST URL for a node, e.g. `trainers` -> `{db}/trainers.json`
    fn node_url(&self, path: &str) -> String {
        let encoded = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let mut url = format!("{}/{}.json", self.database_url, encoded);
        if let Some(token) = &self.auth_token {
            url.push_str("?auth=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    /// Fetch the JSON value stored at `path`; a missing node yields `Value::Null`
    pub async fn get(&self, path: &str) -> Result<Value, FirebaseError> {
        let url = self.node_url(path);
        debug!("Fetching Firebase node: {}", path);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Firebase returned status {} for node {}", status, path);
            return Err(FirebaseError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FirebaseError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::spawn_mock_server;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn client(database_url: &str, auth_token: Option<&str>) -> FirebaseRealtimeClient {
        FirebaseRealtimeClient::new(&FirebaseConfig {
            database_url: database_url.to_string(),
            trainers_path: "trainers".to_string(),
            auth_token: auth_token.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn test_node_url_without_auth() {
        let c = client("https://demo-default-rtdb.firebaseio.com/", None);
        assert_eq!(
            c.node_url("trainers"),
            "https://demo-default-rtdb.firebaseio.com/trainers.json"
        );
    }

    #[test]
    fn test_node_url_encodes_segments_and_token() {
        let c = client("https://demo.firebaseio.com", Some("a b&c"));
        assert_eq!(
            c.node_url("/field teams/north/"),
            "https://demo.firebaseio.com/field%20teams/north.json?auth=a%20b%26c"
        );
    }

    #[tokio::test]
    async fn test_get_passes_auth_and_returns_body() {
        let app = Router::new().route(
            "/trainers.json",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({ "auth": params.get("auth") }))
            }),
        );
        let base_url = spawn_mock_server(app).await;

        let c = client(&base_url, Some("token"));
        let value = c.get("trainers").await.unwrap();
        assert_eq!(value, json!({ "auth": "token" }));
    }

    #[tokio::test]
    async fn test_get_maps_error_status() {
        let app = Router::new().route(
            "/trainers.json",
            get(|| async { (axum::http::StatusCode::UNAUTHORIZED, "Permission denied") }),
        );
        let base_url = spawn_mock_server(app).await;

        let c = client(&base_url, None);
        let err = c.get("trainers").await.unwrap_err();
        assert!(matches!(err, FirebaseError::Status { status: 401, .. }));
    }
}
