//! The closed tag taxonomy.
//!
//! Maps recognizer entity-type identifiers to canonical `[FAKE_*]` output
//! tags. The allow-list below is what gets sent to the analyzer — detection
//! is restricted to these types so the output vocabulary stays predictable.

use std::sync::LazyLock;

use regex::Regex;

/// Entity types requested from the recognizer, and nothing else.
pub const DEFAULT_ENTITIES: &[&str] = &[
    "PERSON",
    "EMAIL_ADDRESS",
    "PHONE_NUMBER",
    "IBAN_CODE",
    "IT_FISCAL_CODE",
    "IT_VAT_CODE",
    "IT_IDENTITY_CARD",
    "IT_PASSPORT",
    "IT_DRIVER_LICENSE",
    "LOCATION",
    "CREDIT_CARD",
];

/// Matches any canonical tag, e.g. `[FAKE_EMAIL]`.
pub static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[FAKE_[A-Z0-9_]+\]").unwrap());

/// Canonical tag for a recognizer entity type.
///
/// Unmapped types fall back to a generic tag derived from the type name,
/// so an extended allow-list still produces well-formed tags.
pub fn canonical_tag(entity_type: &str) -> String {
    let label = match entity_type {
        "PERSON" => "PERSON",
        "EMAIL_ADDRESS" => "EMAIL",
        "PHONE_NUMBER" => "PHONE",
        "IBAN_CODE" => "IBAN",
        "IT_FISCAL_CODE" => "FISCAL_CODE",
        "IT_VAT_CODE" => "VAT",
        "IT_IDENTITY_CARD" | "IT_PASSPORT" | "IT_DRIVER_LICENSE" => "DOCUMENT",
        "LOCATION" => "LOCATION",
        "CREDIT_CARD" => "CREDIT_CARD",
        other => return format!("[FAKE_{}]", sanitize_label(other)),
    };
    format!("[FAKE_{label}]")
}

/// Number of canonical tags present in a text.
pub fn count_tags(text: &str) -> usize {
    TAG_PATTERN.find_iter(text).count()
}

fn sanitize_label(entity_type: &str) -> String {
    entity_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
