use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::geocoding::LocationResolver;
use crate::features::trainers::models::{EnrichedRecord, RawTrainerRecord};
use crate::features::trainers::sources::TrainerSource;

/// Result of one enrichment pass
#[derive(Debug, Clone, Default)]
pub struct EnrichmentOutcome {
    /// Trainers with coordinates and a resolved region, ordered by phone
    pub records: Vec<EnrichedRecord>,
    /// Documents present in the source, including dropped ones
    pub source_total: usize,
    /// Documents dropped for missing coordinates
    pub dropped: usize,
}

impl EnrichmentOutcome {
    pub fn source_is_empty(&self) -> bool {
        self.source_total == 0
    }
}

/// Fetches trainer documents and attaches a region to each one
pub struct EnrichmentService {
    source: Arc<dyn TrainerSource>,
    resolver: Arc<LocationResolver>,
}

impl EnrichmentService {
    pub fn new(source: Arc<dyn TrainerSource>, resolver: Arc<LocationResolver>) -> Self {
        Self { source, resolver }
    }

    /// Fetch the full record set and resolve every usable record
    pub async fn load(&self) -> Result<EnrichmentOutcome> {
        let raw = self.source.fetch_trainers().await.map_err(|e| {
            tracing::error!("Failed to fetch trainer data: {}", e);
            AppError::ExternalServiceError(format!("Failed to fetch trainer data: {}", e))
        })?;

        Ok(self.enrich(raw).await)
    }

    /// Drop records without coordinates and resolve the rest, one at a time
    pub async fn enrich(&self, raw: BTreeMap<String, RawTrainerRecord>) -> EnrichmentOutcome {
        let source_total = raw.len();
        let mut run = self.resolver.start_run();
        let mut records = Vec::with_capacity(source_total);

        for (phone, document) in raw {
            let Some(record) = document.into_record(&phone) else {
                tracing::debug!("Dropping trainer {}: missing coordinates", phone);
                continue;
            };

            let region = run.resolve(record.latitude, record.longitude).await;
            records.push(record.with_region(region));
        }

        let dropped = source_total - records.len();
        tracing::info!(
            "Enriched {} of {} trainers ({} dropped, {} geocoding lookups, {} memo hits)",
            records.len(),
            source_total,
            dropped,
            run.lookups(),
            run.memo_hits()
        );

        EnrichmentOutcome {
            records,
            source_total,
            dropped,
        }
    }
}
