use async_trait::async_trait;
use serde::Deserialize;

use super::{non_blank, GeocodingError, RegionProvider};

/// Nominatim `/reverse` response structure
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    #[allow(dead_code)]
    pub display_name: Option<String>,
    pub address: Option<NominatimAddress>,
    /// Set instead of `address` when nothing was found, e.g. "Unable to geocode"
    pub error: Option<String>,
}

/// Nominatim address components
#[derive(Debug, Deserialize)]
pub struct NominatimAddress {
    pub state: Option<String>,
    #[allow(dead_code)]
    pub country_code: Option<String>,
}

/// Secondary provider: OpenStreetMap Nominatim, credential-free
pub struct NominatimProvider {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RegionProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodingError> {
        let url = format!(
            "{}/reverse?format=json&addressdetails=1&lat={}&lon={}",
            self.base_url, lat, lon
        );
        tracing::debug!("Reverse geocoding (nominatim): {},{}", lat, lon);

        // State names in English regardless of the local script
        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "en")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodingError::Status(response.status().as_u16()));
        }

        let body: NominatimReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::Malformed(e.to_string()))?;

        if let Some(error) = body.error {
            tracing::debug!("Nominatim could not geocode {},{}: {}", lat, lon, error);
            return Err(GeocodingError::NoRegion);
        }

        non_blank(body.address.and_then(|a| a.state))
    }
}
