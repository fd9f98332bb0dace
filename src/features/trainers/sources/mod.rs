mod firebase_source;

pub use firebase_source::{parse_snapshot, FirebaseTrainerSource};

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::features::trainers::models::RawTrainerRecord;
use crate::modules::firebase::FirebaseError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Firebase(#[from] FirebaseError),

    #[error("unexpected trainer data shape: {0}")]
    Malformed(String),
}

/// Read-only access to the trainer documents, keyed by phone number.
///
/// The map is ordered by key so every render lists trainers the same way.
#[async_trait]
pub trait TrainerSource: Send + Sync {
    async fn fetch_trainers(&self) -> Result<BTreeMap<String, RawTrainerRecord>, SourceError>;
}
