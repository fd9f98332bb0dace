use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::ALL_REGIONS;

// ============================================================================
// Query
// ============================================================================

/// Query params for the dashboard view
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DashboardQueryParams {
    /// State to show; "All" (default) shows every trainer
    pub region: Option<String>,
}

impl DashboardQueryParams {
    /// Selected region, defaulting to "All" when absent or blank
    pub fn selected_region(&self) -> &str {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(ALL_REGIONS)
    }
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapCenterDto {
    pub lat: f64,
    pub lon: f64,
}

/// One trainer pin on the map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapMarkerDto {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub phone: String,
    pub timestamp: String,
    pub region: String,
    /// Popup text, one field per line
    pub label: String,
}

/// Everything the map widget needs to draw the selected view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapViewDto {
    pub center: MapCenterDto,
    pub zoom: u8,
    pub markers: Vec<MapMarkerDto>,
    /// GeoJSON FeatureCollection outlining the selected state
    #[schema(value_type = Option<Object>)]
    pub boundary: Option<serde_json::Value>,
}

// ============================================================================
// Table
// ============================================================================

/// One row of the trainer details table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainerRowDto {
    pub name: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub region: String,
}

// ============================================================================
// View
// ============================================================================

/// Complete dashboard view for one region selection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardViewDto {
    pub selected_region: String,
    /// Filter options: "All" followed by every resolved state, sorted
    pub regions: Vec<String>,
    pub map: MapViewDto,
    pub trainers: Vec<TrainerRowDto>,
    /// Trainers with coordinates across all regions
    pub total_trainers: usize,
    /// Render time, e.g. "18 October 2026, 07:39 PM"
    pub last_updated: String,
    /// Non-fatal problems, e.g. a missing boundary dataset
    pub warnings: Vec<String>,
}
