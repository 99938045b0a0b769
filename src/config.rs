//! Pipeline configuration.
//!
//! Every policy knob of the curation pipeline lives here as a named option:
//! the entity allow-list, field designations, filter thresholds, and the
//! batching parameters for the AI validation phase. Defaults reproduce the
//! policy used for the PA help-desk ticket exports.

use serde::Serialize;

use crate::pipeline::anonymize::tags::DEFAULT_ENTITIES;
use crate::pipeline::filter::denylist::DEFAULT_DENYLIST;

/// Default tag-density rejection threshold (inclusive).
pub const DEFAULT_TAG_DENSITY_THRESHOLD: f64 = 0.6;

/// Default number of records per AI validation call.
pub const DEFAULT_AI_BATCH_SIZE: usize = 10;

/// Default per-record character cap inside the batch prompt.
pub const DEFAULT_AI_TRUNCATE_CHARS: usize = 2000;

/// Minimum text length worth a remote validation call.
pub const DEFAULT_AI_MIN_TEXT_CHARS: usize = 20;

/// Character budget per chunk for standalone document anonymization.
pub const DEFAULT_CHUNK_CHARS: usize = 80_000;

/// Configuration for one pipeline run.
///
/// Field designations refer to CSV header names; a run fails immediately if
/// a designated column is missing from the input header.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Recognizer language hint.
    pub language: String,
    /// Explicit entity-type allow-list passed to the recognizer.
    /// Keeps the tag taxonomy closed — never "all types the recognizer knows".
    pub entities: Vec<String>,
    /// Columns anonymized in Phase 1, in output order.
    pub anonymize_fields: Vec<String>,
    /// Column checked for tag density (the primary description).
    pub description_field: String,
    /// Column checked against the denylist and validated by the AI phase
    /// (the resolution text that ends up in the knowledge base).
    pub resolution_field: String,
    /// Reject a record when tag density of the description is ≥ this value.
    pub tag_density_threshold: f64,
    /// Boilerplate phrases that reject a record on case-insensitive match.
    pub denylist: Vec<String>,
    /// Records per AI validation prompt.
    pub ai_batch_size: usize,
    /// Per-record character cap inside the batch prompt.
    pub ai_truncate_chars: usize,
    /// Resolution texts shorter than this are rejected without a remote call.
    pub ai_min_text_chars: usize,
    /// Remote classifier model name.
    pub ai_model: String,
    /// Completion token budget per batch call.
    pub ai_max_tokens: u32,
    /// Sampling temperature for the classifier.
    pub ai_temperature: f32,
    /// Optional fixed pause between batch calls (rate limiting).
    pub ai_batch_delay_ms: Option<u64>,
    /// Process only the first N data rows (dry runs).
    pub row_limit: Option<usize>,
    /// Chunk size for standalone document anonymization.
    pub chunk_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: "it".into(),
            entities: DEFAULT_ENTITIES.iter().map(|e| e.to_string()).collect(),
            anonymize_fields: vec![
                "oggetto".into(),
                "descrizione".into(),
                "soluzione".into(),
            ],
            description_field: "descrizione".into(),
            resolution_field: "soluzione".into(),
            tag_density_threshold: DEFAULT_TAG_DENSITY_THRESHOLD,
            denylist: DEFAULT_DENYLIST.iter().map(|p| p.to_string()).collect(),
            ai_batch_size: DEFAULT_AI_BATCH_SIZE,
            ai_truncate_chars: DEFAULT_AI_TRUNCATE_CHARS,
            ai_min_text_chars: DEFAULT_AI_MIN_TEXT_CHARS,
            ai_model: "gpt-4o-mini".into(),
            ai_max_tokens: 4096,
            ai_temperature: 0.0,
            ai_batch_delay_ms: None,
            row_limit: None,
            chunk_chars: DEFAULT_CHUNK_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_policy() {
        let config = PipelineConfig::default();
        assert_eq!(config.language, "it");
        assert!((config.tag_density_threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.ai_batch_size, 10);
        assert_eq!(config.ai_truncate_chars, 2000);
        assert_eq!(config.ai_min_text_chars, 20);
        assert_eq!(config.chunk_chars, 80_000);
        assert!(config.row_limit.is_none());
        assert!(config.ai_batch_delay_ms.is_none());
    }

    #[test]
    fn default_entities_are_closed_allow_list() {
        let config = PipelineConfig::default();
        assert!(config.entities.iter().any(|e| e == "PERSON"));
        assert!(config.entities.iter().any(|e| e == "EMAIL_ADDRESS"));
        assert!(config.entities.iter().any(|e| e == "IBAN_CODE"));
        assert!(!config.entities.is_empty());
    }

    #[test]
    fn config_serializes() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"tag_density_threshold\":0.6"));
        assert!(json.contains("\"ai_batch_size\":10"));
    }
}
