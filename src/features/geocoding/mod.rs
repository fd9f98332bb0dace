pub mod providers;
pub mod services;

pub use providers::{GeocodingError, RegionProvider};
pub use services::LocationResolver;
