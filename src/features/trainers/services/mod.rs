mod enrichment_service;

pub use enrichment_service::{EnrichmentOutcome, EnrichmentService};
