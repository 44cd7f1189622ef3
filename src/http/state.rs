use crate::pets::Pets;
use crate::store::RecordStore;
use std::sync::Arc;

/// Shared application state for HTTP handlers
///
/// Immutable once built; every request reaches the store through the same
/// injected client.
#[derive(Clone)]
pub struct AppState {
    /// Pets table access
    pub pets: Pets,
}

impl AppState {
    pub fn new(pets: Pets) -> Self {
        Self { pets }
    }

    /// State backed by `store`, reading and writing `table`
    pub fn with_store(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self::new(Pets::new(store, table))
    }
}
