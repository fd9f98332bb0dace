use chrono::Local;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardViewDto, MapViewDto};
use crate::features::dashboard::services::view_builder;
use crate::features::dashboard::services::BoundaryService;
use crate::features::trainers::models::EnrichedRecord;
use crate::features::trainers::EnrichmentService;
use crate::shared::constants::{ALL_REGIONS, LAST_UPDATED_FORMAT, UNKNOWN_REGION};

pub const NO_DATA_WARNING: &str = "No trainer location data found yet.";

/// Builds the dashboard view; every call re-fetches and re-resolves all trainers
pub struct DashboardService {
    enrichment: Arc<EnrichmentService>,
    boundaries: Arc<BoundaryService>,
}

impl DashboardService {
    pub fn new(enrichment: Arc<EnrichmentService>, boundaries: Arc<BoundaryService>) -> Self {
        Self {
            enrichment,
            boundaries,
        }
    }

    pub async fn get_view(&self, region: &str) -> Result<DashboardViewDto> {
        let outcome = self.enrichment.load().await?;

        let mut warnings = Vec::new();
        if outcome.source_is_empty() {
            warnings.push(NO_DATA_WARNING.to_string());
        }

        let boundary = self.boundary_overlay(region, &mut warnings).await;
        Ok(build_view(&outcome.records, region, boundary, warnings))
    }

    /// Outline for a concrete state; load failures become a warning
    async fn boundary_overlay(
        &self,
        region: &str,
        warnings: &mut Vec<String>,
    ) -> Option<serde_json::Value> {
        if region == ALL_REGIONS || region == UNKNOWN_REGION {
            return None;
        }

        match self.boundaries.find_region(region).await {
            Ok(overlay) => overlay,
            Err(e) => {
                tracing::warn!("Skipping boundary overlay for {}: {}", region, e);
                warnings.push(format!("Boundary overlay unavailable: {}", e));
                None
            }
        }
    }
}

/// Assemble the view for `region` from already-enriched records
pub fn build_view(
    records: &[EnrichedRecord],
    region: &str,
    boundary: Option<serde_json::Value>,
    warnings: Vec<String>,
) -> DashboardViewDto {
    let filtered = view_builder::filter_by_region(records, region);

    // A stale selection stays selectable so the filter control matches the view
    let mut regions = view_builder::region_options(records);
    if !regions.iter().any(|r| r == region) {
        regions.push(region.to_string());
    }

    DashboardViewDto {
        selected_region: region.to_string(),
        regions,
        map: MapViewDto {
            center: view_builder::map_center(&filtered),
            zoom: view_builder::zoom_level(region),
            markers: filtered.iter().map(|r| view_builder::marker(r)).collect(),
            boundary,
        },
        trainers: filtered.iter().map(|r| view_builder::table_row(r)).collect(),
        total_trainers: records.len(),
        last_updated: Local::now().format(LAST_UPDATED_FORMAT).to_string(),
        warnings,
    }
}
