use serde::Deserialize;
use serde_json::Value;

/// Why a webhook body was rejected
///
/// The `Display` text is returned to the caller as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Invalid embeds")]
    InvalidEmbeds,
}

/// One chat embed
///
/// Only the parts used for extraction are modelled. Field names and values
/// are kept loose because webhook senders are not consistent about types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embed {
    /// Must be a string when present
    #[serde(default)]
    pub description: Option<String>,

    /// Absent and `null` both mean no fields
    #[serde(default)]
    pub fields: Option<Vec<EmbedField>>,
}

/// A `name`/`value` pair inside an embed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedField {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Embed {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[EmbedField] {
        self.fields.as_deref().unwrap_or_default()
    }
}

impl EmbedField {
    /// True when the field's name is exactly `label`
    pub fn is_labelled(&self, label: &str) -> bool {
        self.name.as_ref().and_then(Value::as_str) == Some(label)
    }

    /// Field value as text; `null` counts as no value, numbers and other
    /// scalars are rendered as JSON
    pub fn text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Parse a webhook body and return its first embed
///
/// Later embeds are ignored.
pub fn first_embed(body: &[u8]) -> Result<Embed, PayloadError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| PayloadError::InvalidJson)?;

    let first = payload
        .get("embeds")
        .and_then(Value::as_array)
        .and_then(|embeds| embeds.first())
        .ok_or(PayloadError::InvalidEmbeds)?;

    Embed::deserialize(first).map_err(|_| PayloadError::InvalidEmbeds)
}
