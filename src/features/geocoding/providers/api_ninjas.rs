use async_trait::async_trait;
use serde::Deserialize;

use super::{non_blank, GeocodingError, RegionProvider};

/// One entry of the API Ninjas reverse geocoding response array
#[derive(Debug, Deserialize)]
pub struct ApiNinjasPlace {
    #[allow(dead_code)]
    pub name: Option<String>,
    pub state: Option<String>,
    #[allow(dead_code)]
    pub country: Option<String>,
}

/// Primary provider: API Ninjas reverse geocoding, authenticated by API key
pub struct ApiNinjasProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiNinjasProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl RegionProvider for ApiNinjasProvider {
    fn name(&self) -> &'static str {
        "api-ninjas"
    }

    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodingError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GeocodingError::MissingCredential("API Ninjas"))?;

        let url = format!(
            "{}/v1/reversegeocoding?lat={}&lon={}",
            self.base_url, lat, lon
        );
        tracing::debug!("Reverse geocoding (api-ninjas): {},{}", lat, lon);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodingError::Status(response.status().as_u16()));
        }

        let places: Vec<ApiNinjasPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::Malformed(e.to_string()))?;

        let first = places.into_iter().next().ok_or(GeocodingError::NoRegion)?;
        non_blank(first.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::spawn_mock_server;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn provider(base_url: &str, key: Option<&str>) -> ApiNinjasProvider {
        ApiNinjasProvider::new(reqwest::Client::new(), base_url, key.map(str::to_string))
    }

    #[tokio::test]
    async fn test_reads_state_of_first_result() {
        let app = Router::new().route(
            "/v1/reversegeocoding",
            get(
                |headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    if headers.get("x-api-key").map(|v| v.as_bytes()) != Some(b"k") {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    assert_eq!(q.get("lat").map(String::as_str), Some("28.6"));
                    assert_eq!(q.get("lon").map(String::as_str), Some("77.2"));
                    Json(json!([
                        { "name": "New Delhi", "state": "Delhi", "country": "IN" },
                        { "name": "Noida", "state": "Uttar Pradesh", "country": "IN" }
                    ]))
                    .into_response()
                },
            ),
        );
        let base_url = spawn_mock_server(app).await;

        let region = provider(&base_url, Some("k")).reverse(28.6, 77.2).await.unwrap();
        assert_eq!(region, "Delhi");
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let err = provider("http://127.0.0.1:9", None)
            .reverse(28.6, 77.2)
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodingError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/v1/reversegeocoding",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let base_url = spawn_mock_server(app).await;

        let err = provider(&base_url, Some("k")).reverse(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, GeocodingError::Status(429)));
    }

    #[tokio::test]
    async fn test_empty_array_and_blank_state_have_no_region() {
        let app = Router::new().route(
            "/v1/reversegeocoding",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("lat").map(String::as_str) == Some("1") {
                    Json(json!([]))
                } else {
                    Json(json!([{ "name": "Sea", "state": "  " }]))
                }
            }),
        );
        let base_url = spawn_mock_server(app).await;
        let p = provider(&base_url, Some("k"));

        assert!(matches!(
            p.reverse(1.0, 2.0).await.unwrap_err(),
            GeocodingError::NoRegion
        ));
        assert!(matches!(
            p.reverse(3.0, 2.0).await.unwrap_err(),
            GeocodingError::NoRegion
        ));
    }

    #[tokio::test]
    async fn test_object_body_is_malformed() {
        let app = Router::new().route(
            "/v1/reversegeocoding",
            get(|| async { Json(json!({ "error": "quota" })) }),
        );
        let base_url = spawn_mock_server(app).await;

        let err = provider(&base_url, Some("k")).reverse(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, GeocodingError::Malformed(_)));
    }
}
