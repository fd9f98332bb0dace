use serde_json::{json, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::config::BoundaryConfig;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary file {0} not found")]
    Missing(String),

    #[error("failed to read boundary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("boundary file {path} is not a GeoJSON FeatureCollection: {reason}")]
    Malformed { path: String, reason: String },
}

/// Looks up state outlines in a static GeoJSON dataset.
///
/// The file is read on every lookup, matching the rest of the render path.
pub struct BoundaryService {
    path: PathBuf,
    name_property: String,
}

impl BoundaryService {
    pub fn new(path: impl Into<PathBuf>, name_property: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name_property: name_property.into(),
        }
    }

    pub fn from_config(config: &BoundaryConfig) -> Self {
        Self::new(&config.file, config.name_property.clone())
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_features(&self) -> Result<Vec<Value>, BoundaryError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BoundaryError::Missing(self.display_path()),
                _ => BoundaryError::Io {
                    path: self.display_path(),
                    source: e,
                },
            })?;

        let malformed = |reason: String| BoundaryError::Malformed {
            path: self.display_path(),
            reason,
        };

        let document: Value = serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
        match document {
            Value::Object(mut map) => match map.remove("features") {
                Some(Value::Array(features)) => Ok(features),
                _ => Err(malformed("missing \"features\" array".to_string())),
            },
            _ => Err(malformed("top level is not an object".to_string())),
        }
    }

    /// FeatureCollection of the features whose name matches `region`
    /// case-insensitively, or `None` when the dataset has no such state
    pub async fn find_region(&self, region: &str) -> Result<Option<Value>, BoundaryError> {
        let wanted = region.trim().to_lowercase();
        let features: Vec<Value> = self
            .load_features()
            .await?
            .into_iter()
            .filter(|feature| {
                feature
                    .get("properties")
                    .and_then(|p| p.get(&self.name_property))
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.trim().to_lowercase() == wanted)
            })
            .collect();

        if features.is_empty() {
            tracing::debug!("No boundary feature named {:?} in {}", region, self.display_path());
            return Ok(None);
        }

        Ok(Some(json!({
            "type": "FeatureCollection",
            "features": features,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("trainer-locator-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn states_fixture() -> String {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "ST_NM": "Delhi" },
                    "geometry": { "type": "Polygon", "coordinates": [[[77.0, 28.4], [77.3, 28.4], [77.3, 28.8], [77.0, 28.4]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "ST_NM": "Karnataka" },
                    "geometry": { "type": "Polygon", "coordinates": [[[74.0, 12.0], [78.0, 12.0], [78.0, 18.0], [74.0, 12.0]]] }
                },
                { "type": "Feature", "properties": null, "geometry": null }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_find_region_matches_case_insensitively() {
        let path = write_fixture("states.geojson", &states_fixture());
        let service = BoundaryService::new(path, "ST_NM");

        let overlay = service.find_region("  DELHI ").await.unwrap().unwrap();
        assert_eq!(overlay["type"], "FeatureCollection");
        let features = overlay["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["ST_NM"], "Delhi");
    }

    #[tokio::test]
    async fn test_find_region_without_match_is_none() {
        let path = write_fixture("states.geojson", &states_fixture());
        let service = BoundaryService::new(path, "ST_NM");

        assert!(service.find_region("Goa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let service = BoundaryService::new("/nonexistent/india_states.geojson", "ST_NM");
        let err = service.find_region("Delhi").await.unwrap_err();
        assert!(matches!(err, BoundaryError::Missing(_)));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let not_json = write_fixture("broken.geojson", "{ not json");
        let err = BoundaryService::new(not_json, "ST_NM")
            .find_region("Delhi")
            .await
            .unwrap_err();
        assert!(matches!(err, BoundaryError::Malformed { .. }));

        let no_features = write_fixture("empty.geojson", r#"{"type":"FeatureCollection"}"#);
        let err = BoundaryService::new(no_features, "ST_NM")
            .find_region("Delhi")
            .await
            .unwrap_err();
        assert!(matches!(err, BoundaryError::Malformed { .. }));
    }
}
