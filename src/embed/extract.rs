use super::payload::Embed;
use crate::pets::NewPet;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Field carrying the pet's name
pub const NAME_LABEL: &str = "🪙 Name:";

/// Field the owner is read from
// Not an owner label: the sender only provides "Players".
pub const PLAYERS_LABEL: &str = "👥 Players:";

const RARITY_PATTERN: &str = r"(?i)Rarity:\s*([^\s]+)";

fn rarity_regex() -> &'static Regex {
    static RARITY: OnceLock<Regex> = OnceLock::new();
    RARITY.get_or_init(|| Regex::new(RARITY_PATTERN).expect("rarity pattern compiles"))
}

/// First whitespace-delimited token after `Rarity:` (any case)
pub fn extract_rarity(description: &str) -> Option<&str> {
    rarity_regex()
        .captures(description)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
}

/// Value of the last field named `label`
///
/// A later match replaces an earlier one even when its value is empty.
pub fn last_field_value(embed: &Embed, label: &str) -> Option<String> {
    embed
        .fields()
        .iter()
        .rev()
        .find(|field| field.is_labelled(label))
        .and_then(|field| field.text())
}

/// Shape an embed into a record stamped with `created_at`
pub fn extract_pet(embed: &Embed, created_at: DateTime<Utc>) -> NewPet {
    let pet_name = last_field_value(embed, NAME_LABEL);
    let owner = last_field_value(embed, PLAYERS_LABEL);
    let rarity = embed.description().and_then(extract_rarity);

    NewPet::new(pet_name.as_deref(), rarity, owner.as_deref(), created_at)
}
