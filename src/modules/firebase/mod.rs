//! Firebase Realtime Database access over its REST interface.
//!
//! Every node is addressable as `{database_url}/{path}.json`; reads return the
//! node's JSON value or `null` when the node does not exist.

mod realtime_client;

pub use realtime_client::{FirebaseError, FirebaseRealtimeClient};
