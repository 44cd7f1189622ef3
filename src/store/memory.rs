use super::{Filter, FilterOp, Order, RecordStore, Row, StoreError};
use chrono::DateTime;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use tracing::debug;

/// In-process record store
///
/// Each inserted row gets an incrementing integer `id` unless it already
/// carries one. Timestamps stored as RFC 3339 strings compare as instants.
pub struct MemoryStore {
    /// Rows per table, in insertion order
    tables: RwLock<HashMap<String, Vec<Row>>>,

    /// Next identifier handed out on insert
    next_id: AtomicI64,

    /// When set, every operation fails with this message
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            failure: None,
        }
    }

    /// A store whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Snapshot of every row in `table`, in insertion order
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        let tables = self.tables.read().await;
        tables.get(table).cloned().unwrap_or_default()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn query(
        &self,
        table: &str,
        filter: Filter,
        order: Order,
    ) -> Result<Vec<Row>, StoreError> {
        self.check_failure()?;

        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // sort_by is stable, so rows with equal keys keep insertion order
        rows.sort_by(|a, b| {
            let ordering = match (a.get(&order.field), b.get(&order.field)) {
                (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            };
            if order.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        debug!("Memory query on {} matched {} rows", table, rows.len());
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Vec<Row>, StoreError> {
        self.check_failure()?;

        if !row.contains_key("id") {
            let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
            row.insert("id".to_string(), Value::from(id));
        }

        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        Ok(vec![row])
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn matches(row: &Row, filter: &Filter) -> bool {
    let Some(value) = row.get(&filter.field) else {
        return false;
    };
    match filter.op {
        FilterOp::Gt => compare_values(value, &filter.value) == Some(Ordering::Greater),
    }
}

/// Order two column values the way a relational store would for the common
/// cases: timestamps as instants, numbers numerically, other text lexically.
/// Values of mismatched kinds are incomparable.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(a), Ok(b)) => Some(a.cmp(&b)),
                _ => Some(a.cmp(b)),
            }
        }
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
