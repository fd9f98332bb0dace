mod api_ninjas;
mod nominatim;

pub use api_ninjas::ApiNinjasProvider;
pub use nominatim::NominatimProvider;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Reasons a single provider could not produce a region
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("{0} credential is not configured")]
    MissingCredential(&'static str),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no region in response")]
    NoRegion,
}

/// A reverse geocoding backend that maps coordinates to a state name
#[async_trait]
pub trait RegionProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodingError>;
}

/// Build the shared outbound client for geocoding providers
pub fn build_http_client(
    user_agent: &str,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, GeocodingError> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent.to_string());
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Trim a provider's region value, rejecting blanks
fn non_blank(value: Option<String>) -> Result<String, GeocodingError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(GeocodingError::NoRegion)
}
