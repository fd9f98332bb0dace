mod trainer;

pub use trainer::{EnrichedRecord, RawTrainerRecord, TrainerRecord};
