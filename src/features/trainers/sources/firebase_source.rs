use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{SourceError, TrainerSource};
use crate::features::trainers::models::RawTrainerRecord;
use crate::modules::firebase::FirebaseRealtimeClient;

/// Trainer documents stored under a single Firebase node
pub struct FirebaseTrainerSource {
    client: Arc<FirebaseRealtimeClient>,
    path: String,
}

impl FirebaseTrainerSource {
    pub fn new(client: Arc<FirebaseRealtimeClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }
}

#[async_trait]
impl TrainerSource for FirebaseTrainerSource {
    async fn fetch_trainers(&self) -> Result<BTreeMap<String, RawTrainerRecord>, SourceError> {
        let snapshot = self.client.get(&self.path).await?;
        let trainers = parse_snapshot(snapshot)?;
        tracing::debug!("Fetched {} trainer documents from /{}", trainers.len(), self.path);
        Ok(trainers)
    }
}

/// Convert a node snapshot into trainer documents.
///
/// Firebase returns `null` for an absent node and turns children with small
/// integer keys into a JSON array (holes become `null`).
pub fn parse_snapshot(snapshot: Value) -> Result<BTreeMap<String, RawTrainerRecord>, SourceError> {
    let entries: Vec<(String, Value)> = match snapshot {
        Value::Null => Vec::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            return Err(SourceError::Malformed(format!(
                "expected an object of trainers, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut trainers = BTreeMap::new();
    for (id, value) in entries {
        match serde_json::from_value::<RawTrainerRecord>(value) {
            Ok(record) => {
                trainers.insert(id, record);
            }
            Err(e) => tracing::warn!("Skipping trainer {}: {}", id, e),
        }
    }

    Ok(trainers)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FirebaseConfig;
    use crate::shared::test_helpers::spawn_mock_server;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_null_snapshot_is_empty() {
        assert!(parse_snapshot(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_object_snapshot_is_sorted_by_id() {
        let trainers = parse_snapshot(json!({
            "9876543210": { "latitude": 19.07, "longitude": 72.87, "name": "B" },
            "9123456789": { "latitude": 28.6, "longitude": 77.2, "name": "A" }
        }))
        .unwrap();

        let ids: Vec<_> = trainers.keys().cloned().collect();
        assert_eq!(ids, vec!["9123456789", "9876543210"]);
    }

    #[test]
    fn test_array_snapshot_skips_holes() {
        let trainers = parse_snapshot(json!([
            null,
            { "latitude": 12.9, "longitude": 77.5 },
            null,
            { "latitude": 13.0, "longitude": 80.2 }
        ]))
        .unwrap();

        let ids: Vec<_> = trainers.keys().cloned().collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_non_object_children_are_skipped() {
        let trainers = parse_snapshot(json!({
            "1": "not a trainer",
            "2": { "latitude": 12.9, "longitude": 77.5 }
        }))
        .unwrap();
        assert_eq!(trainers.len(), 1);
        assert!(trainers.contains_key("2"));
    }

    #[test]
    fn test_scalar_snapshot_is_malformed() {
        let err = parse_snapshot(json!("oops")).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_fetch_trainers_reads_configured_node() {
        let app = Router::new().route(
            "/field/trainers.json",
            get(|| async {
                Json(json!({ "9999999999": { "latitude": 28.6, "longitude": 77.2 } }))
            }),
        );
        let base_url = spawn_mock_server(app).await;
        let client = FirebaseRealtimeClient::new(&FirebaseConfig {
            database_url: base_url,
            trainers_path: "field/trainers".to_string(),
            auth_token: None,
        })
        .unwrap();

        let source = FirebaseTrainerSource::new(Arc::new(client), "field/trainers");
        let trainers = source.fetch_trainers().await.unwrap();
        assert_eq!(trainers.len(), 1);
        assert!(trainers.contains_key("9999999999"));
    }
}
