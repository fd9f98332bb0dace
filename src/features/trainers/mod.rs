pub mod models;
pub mod services;
pub mod sources;

pub use services::EnrichmentService;
pub use sources::{FirebaseTrainerSource, TrainerSource};
