use serde::{Deserialize, Serialize};

use super::RecognizerError;

/// A PII span detected over one field's text.
///
/// Offsets are character positions into the analyzed text (the analyzer
/// service counts characters, not bytes). Spans are ephemeral — produced
/// per field, consumed by the replacement plan, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiSpan {
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// Result of anonymizing one text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedText {
    pub text: String,
    /// Spans actually replaced (overlaps dropped).
    pub entity_count: usize,
    /// Whitespace-token count of the text before anonymization, for the
    /// tag-density filter downstream.
    pub word_count: usize,
}

/// How detected spans are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementMode {
    /// Canonical `[FAKE_*]` tag labels. Used by the CSV record pipeline.
    Tags,
    /// Registry-backed fabricated values. Used for standalone documents.
    FakeValues,
}

/// PII recognizer abstraction (allows mocking).
///
/// `entities` is the explicit allow-list of entity types to detect; the
/// recognizer must never return types outside it.
pub trait PiiRecognizer {
    fn detect(
        &self,
        text: &str,
        language: &str,
        entities: &[String],
    ) -> Result<Vec<PiiSpan>, RecognizerError>;
}

/// Fake-value generator abstraction.
///
/// Determinism is not required per call — the substitution registry
/// provides run-level consistency on top of whatever this returns.
pub trait FakeValueGenerator {
    fn generate(&self, entity_type: &str) -> String;
}
