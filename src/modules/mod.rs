//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like the realtime database.

pub mod firebase;
