use super::record::{iso_timestamp, NewPet, CREATED_AT};
use crate::store::{Filter, Order, RecordStore, Row, StoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Typed access to the pets table
#[derive(Clone)]
pub struct Pets {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl Pets {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Table name records are read from and written to
    pub fn table(&self) -> &str {
        &self.table
    }

    /// All records created strictly after `cutoff`, oldest first
    ///
    /// Rows come back exactly as the store returned them.
    pub async fn list_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Row>, StoreError> {
        let rows = self
            .store
            .query(
                &self.table,
                Filter::gt(CREATED_AT, iso_timestamp(cutoff)),
                Order::ascending(CREATED_AT),
            )
            .await?;

        debug!(
            "{} returned {} rows from {}",
            self.store.name(),
            rows.len(),
            self.table
        );

        Ok(rows)
    }

    /// Store `pet` and return the first row the store reports back
    pub async fn save(&self, pet: &NewPet) -> Result<Row, StoreError> {
        let rows = self.store.insert(&self.table, pet.to_row()).await?;
        rows.into_iter().next().ok_or(StoreError::EmptyInsert)
    }
}
