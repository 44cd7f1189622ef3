//! Record store access
//!
//! The service reads and writes a single table through the [`RecordStore`]
//! trait. Two implementations exist:
//! - [`PostgrestStore`]: hosted Postgres reached over its REST endpoint
//! - [`MemoryStore`]: process-local tables for development and tests

mod error;
pub mod memory;
pub mod postgrest;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgrest::{PostgrestConfig, PostgrestStore};

use crate::config::{StoreBackend, StoreConfig, STORE_KEY_ENV, STORE_URL_ENV};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A single table row as a JSON object
pub type Row = Map<String, Value>;

/// Comparison operator for a row filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Strictly greater than
    Gt,
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Gt => f.write_str("gt"),
        }
    }
}

/// Row filter: `field op value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt,
            value: value.into(),
        }
    }
}

/// Result ordering on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub ascending: bool,
}

impl Order {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }
}

/// Storage capability the HTTP layer depends on
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every row of `table` matching `filter`, sorted by `order`
    async fn query(&self, table: &str, filter: Filter, order: Order)
        -> Result<Vec<Row>, StoreError>;

    /// Insert `row` into `table` and return the stored row(s)
    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Build the record store described by `config`
pub fn connect(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory record store; records are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgrest => {
            let url = config
                .url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .with_context(|| format!("Store URL is not set (store.url or {})", STORE_URL_ENV))?;
            let key = config
                .service_role_key
                .as_deref()
                .filter(|key| !key.trim().is_empty())
                .with_context(|| {
                    format!(
                        "Store access key is not set (store.service_role_key or {})",
                        STORE_KEY_ENV
                    )
                })?;

            let store = PostgrestStore::new(PostgrestConfig {
                url: url.to_string(),
                service_role_key: key.to_string(),
                timeout: Duration::from_secs(config.timeout_secs),
            })
            .context("Failed to build store client")?;

            info!("Using PostgREST record store at {}", url);
            Ok(Arc::new(store))
        }
    }
}
