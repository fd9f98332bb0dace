// =============================================================================
// REGION CONSTANTS
// =============================================================================

/// Region assigned when no provider could resolve the coordinates
pub const UNKNOWN_REGION: &str = "Unknown";

/// Filter option selecting every region
pub const ALL_REGIONS: &str = "All";

// =============================================================================
// MAP CONSTANTS
// =============================================================================

/// Geographic center of India, used when the filtered set is empty
pub const NATIONAL_CENTER_LAT: f64 = 20.5937;
pub const NATIONAL_CENTER_LON: f64 = 78.9629;

/// Zoom level for the nationwide view
pub const NATIONAL_ZOOM: u8 = 4;

/// Zoom level once a single state is selected
pub const REGION_ZOOM: u8 = 6;

/// Display format for the "last updated" stamp, e.g. "18 October 2026, 07:39 PM"
pub const LAST_UPDATED_FORMAT: &str = "%d %B %Y, %I:%M %p";

// =============================================================================
// SESSION CONSTANTS
// =============================================================================

/// Cookie carrying the admin session token
pub const SESSION_COOKIE_NAME: &str = "trainer_session";
