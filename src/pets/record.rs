use crate::store::Row;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Placeholder stored for any field the embed did not provide
pub const UNKNOWN: &str = "Unknown";

/// Column holding the server-assigned creation time
pub const CREATED_AT: &str = "created_at";

/// A pet observation about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub pet_name: String,
    pub rarity: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl NewPet {
    /// Build a record, replacing missing or empty values with [`UNKNOWN`]
    pub fn new(
        pet_name: Option<&str>,
        rarity: Option<&str>,
        owner: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pet_name: or_unknown(pet_name),
            rarity: or_unknown(rarity),
            owner: or_unknown(owner),
            created_at,
        }
    }

    /// Row shape sent to the store
    pub fn to_row(&self) -> Row {
        let mut row = Map::new();
        row.insert("pet_name".to_string(), Value::from(self.pet_name.as_str()));
        row.insert("rarity".to_string(), Value::from(self.rarity.as_str()));
        row.insert("owner".to_string(), Value::from(self.owner.as_str()));
        row.insert(
            CREATED_AT.to_string(),
            Value::from(iso_timestamp(self.created_at)),
        );
        row
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-17T09:30:00.000Z`
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
