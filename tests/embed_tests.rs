// Unit tests for embed parsing and pet extraction

use chrono::{DateTime, Utc};
use pet_relay::embed::{
    extract_pet, extract_rarity, first_embed, last_field_value, Embed, PayloadError, NAME_LABEL,
};
use serde_json::json;

fn embed(value: serde_json::Value) -> Embed {
    first_embed(json!({ "embeds": [value] }).to_string().as_bytes()).unwrap()
}

fn stamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).unwrap()
}

#[test]
fn test_extract_rarity_basic() {
    assert_eq!(extract_rarity("Rarity: Legendary"), Some("Legendary"));
}

#[test]
fn test_extract_rarity_is_case_insensitive() {
    assert_eq!(extract_rarity("RARITY: mythic"), Some("mythic"));
    assert_eq!(extract_rarity("a new pet! rarity:Rare"), Some("Rare"));
}

#[test]
fn test_extract_rarity_stops_at_whitespace() {
    assert_eq!(
        extract_rarity("**Rarity:** Common\n**Mutation:** Golden"),
        Some("**"),
        "markdown after the label is captured as-is"
    );
    assert_eq!(
        extract_rarity("Rarity: **Secret** pet"),
        Some("**Secret**")
    );
}

#[test]
fn test_extract_rarity_absent() {
    assert_eq!(extract_rarity(""), None);
    assert_eq!(extract_rarity("Rarity:"), None);
    assert_eq!(extract_rarity("Name: Fluffy"), None);
}

#[test]
fn test_first_embed_errors() {
    assert_eq!(first_embed(b"{not json").unwrap_err(), PayloadError::InvalidJson);
    assert_eq!(first_embed(b"").unwrap_err(), PayloadError::InvalidJson);
    assert_eq!(
        first_embed(br#"{"embeds":[]}"#).unwrap_err(),
        PayloadError::InvalidEmbeds
    );
    assert_eq!(
        first_embed(br#"{"content":"hi"}"#).unwrap_err(),
        PayloadError::InvalidEmbeds
    );
    assert_eq!(
        first_embed(br#"{"embeds":[{"fields":"oops"}]}"#).unwrap_err(),
        PayloadError::InvalidEmbeds
    );
}

#[test]
fn test_payload_error_messages() {
    assert_eq!(PayloadError::InvalidJson.to_string(), "Invalid JSON");
    assert_eq!(PayloadError::InvalidEmbeds.to_string(), "Invalid embeds");
}

#[test]
fn test_null_fields_are_treated_as_empty() {
    let embed = embed(json!({ "fields": null, "description": null }));
    assert!(embed.fields().is_empty());
    assert_eq!(embed.description(), None);
}

#[test]
fn test_last_matching_field_wins() {
    let embed = embed(json!({
        "fields": [
            { "name": NAME_LABEL, "value": "First" },
            { "name": "Other", "value": "x" },
            { "name": NAME_LABEL, "value": "Second" }
        ]
    }));

    assert_eq!(last_field_value(&embed, NAME_LABEL).as_deref(), Some("Second"));
}

#[test]
fn test_later_empty_value_still_overrides() {
    let embed = embed(json!({
        "fields": [
            { "name": "🪙 Name:", "value": "Fluffy" },
            { "name": "🪙 Name:", "value": "" }
        ]
    }));

    let pet = extract_pet(&embed, stamp());
    assert_eq!(pet.pet_name, "Unknown");
}

#[test]
fn test_label_match_is_exact() {
    let embed = embed(json!({
        "fields": [
            { "name": "Name:", "value": "NoEmoji" },
            { "name": "🪙 Name: ", "value": "TrailingSpace" },
            { "name": "🪙 name:", "value": "Lowercase" }
        ]
    }));

    assert_eq!(extract_pet(&embed, stamp()).pet_name, "Unknown");
}

#[test]
fn test_extract_pet_full_embed() {
    let embed = embed(json!({
        "title": "A pet hatched!",
        "description": "Egg opened\nRarity: Mythical\nChance: 0.01%",
        "fields": [
            { "name": "🪙 Name:", "value": "Shadow Dragon", "inline": true },
            { "name": "👥 Players:", "value": "12/12", "inline": true }
        ]
    }));

    let pet = extract_pet(&embed, stamp());

    assert_eq!(pet.pet_name, "Shadow Dragon");
    assert_eq!(pet.rarity, "Mythical");
    assert_eq!(pet.owner, "12/12");
    assert_eq!(pet.created_at, stamp());
}

#[test]
fn test_non_string_values_are_rendered() {
    let embed = embed(json!({
        "fields": [
            { "name": "🪙 Name:", "value": 7 },
            { "name": "👥 Players:", "value": null }
        ]
    }));

    let pet = extract_pet(&embed, stamp());

    assert_eq!(pet.pet_name, "7");
    assert_eq!(pet.owner, "Unknown");
    assert_eq!(pet.rarity, "Unknown");
}

#[test]
fn test_non_string_description_is_invalid_embeds() {
    for description in [json!(42), json!(true), json!(["Rarity: Rare"])] {
        let body = json!({ "embeds": [{ "description": description }] }).to_string();
        assert_eq!(
            first_embed(body.as_bytes()).unwrap_err(),
            PayloadError::InvalidEmbeds
        );
    }
}

#[test]
fn test_new_pet_row_shape() {
    let embed = embed(json!({}));
    let row = extract_pet(&embed, stamp()).to_row();

    assert_eq!(
        serde_json::Value::Object(row),
        json!({
            "pet_name": "Unknown",
            "rarity": "Unknown",
            "owner": "Unknown",
            "created_at": "2025-10-09T08:53:20.000Z"
        })
    );
}
