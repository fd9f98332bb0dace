use std::collections::HashMap;
use std::sync::Arc;

use crate::core::config::GeocodingConfig;
use crate::features::geocoding::providers::{
    build_http_client, ApiNinjasProvider, GeocodingError, NominatimProvider, RegionProvider,
};
use crate::shared::constants::UNKNOWN_REGION;

/// Resolves coordinates to a state name by trying providers in order.
///
/// Provider failures are logged and never returned: callers always receive a
/// non-empty region, [`UNKNOWN_REGION`] when every provider failed.
pub struct LocationResolver {
    providers: Vec<Arc<dyn RegionProvider>>,
    memo_precision: Option<u32>,
}

impl LocationResolver {
    pub fn new(providers: Vec<Arc<dyn RegionProvider>>) -> Self {
        Self {
            providers,
            memo_precision: None,
        }
    }

    /// Reuse resolved regions within a run for coordinates equal after rounding
    pub fn with_memoization(mut self, precision: u32) -> Self {
        self.memo_precision = Some(precision);
        self
    }

    /// API Ninjas first, then Nominatim, sharing one HTTP client
    pub fn from_config(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = build_http_client(&config.user_agent, config.timeout)?;

        if config.api_ninjas_key.is_none() {
            tracing::warn!("API_NINJAS_KEY not set; every lookup will use the Nominatim fallback");
        }

        let providers: Vec<Arc<dyn RegionProvider>> = vec![
            Arc::new(ApiNinjasProvider::new(
                client.clone(),
                &config.api_ninjas_base_url,
                config.api_ninjas_key.clone(),
            )),
            Arc::new(NominatimProvider::new(client, &config.nominatim_base_url)),
        ];

        let resolver = Self::new(providers);
        Ok(if config.memoize {
            resolver.with_memoization(config.memo_precision)
        } else {
            resolver
        })
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve a single coordinate pair, bypassing any memo
    pub async fn resolve(&self, lat: f64, lon: f64) -> String {
        for provider in &self.providers {
            match provider.reverse(lat, lon).await {
                Ok(region) if !region.trim().is_empty() => {
                    let region = region.trim().to_string();
                    tracing::debug!("Resolved {},{} via {}: {}", lat, lon, provider.name(), region);
                    return region;
                }
                Ok(_) => {
                    tracing::warn!(
                        "Reverse geocoding via {} returned a blank region for {},{}",
                        provider.name(),
                        lat,
                        lon
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Reverse geocoding via {} failed for {},{}: {}",
                        provider.name(),
                        lat,
                        lon,
                        e
                    );
                }
            }
        }

        UNKNOWN_REGION.to_string()
    }

    /// Start a resolution run; the memo lives only as long as the run
    pub fn start_run(&self) -> ResolutionRun<'_> {
        ResolutionRun {
            resolver: self,
            memo: HashMap::new(),
            lookups: 0,
            memo_hits: 0,
        }
    }
}

type CoordinateKey = (i64, i64);

fn coordinate_key(lat: f64, lon: f64, precision: u32) -> CoordinateKey {
    let scale = 10f64.powi(precision as i32);
    ((lat * scale).round() as i64, (lon * scale).round() as i64)
}

/// One enrichment pass over a record set
pub struct ResolutionRun<'a> {
    resolver: &'a LocationResolver,
    memo: HashMap<CoordinateKey, String>,
    lookups: usize,
    memo_hits: usize,
}

impl ResolutionRun<'_> {
    pub async fn resolve(&mut self, lat: f64, lon: f64) -> String {
        self.lookups += 1;

        let Some(precision) = self.resolver.memo_precision else {
            return self.resolver.resolve(lat, lon).await;
        };

        let key = coordinate_key(lat, lon, precision);
        if let Some(region) = self.memo.get(&key) {
            self.memo_hits += 1;
            return region.clone();
        }

        let region = self.resolver.resolve(lat, lon).await;
        self.memo.insert(key, region.clone());
        region
    }

    pub fn lookups(&self) -> usize {
        self.lookups
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits
    }
}
