pub mod auth;
pub mod dashboard;
pub mod geocoding;
pub mod trainers;
