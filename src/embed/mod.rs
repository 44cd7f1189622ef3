//! Chat embed payloads
//!
//! Webhook bodies carry `{ "embeds": [ { "description": ..., "fields": [...] } ] }`.
//! This module parses the first embed and scrapes a pet record out of it:
//! - `🪙 Name:` field → pet name
//! - `👥 Players:` field → owner
//! - `Rarity: <token>` in the description → rarity

mod extract;
mod payload;

pub use extract::{extract_pet, extract_rarity, last_field_value, NAME_LABEL, PLAYERS_LABEL};
pub use payload::{first_embed, Embed, EmbedField, PayloadError};
