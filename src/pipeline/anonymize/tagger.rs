//! Entity tagging over a single text value.
//!
//! The replacement plan is computed entirely against character offsets in
//! the *original* text: spans are de-overlapped, then the output is rebuilt
//! in one pass. Sequential find-and-replace would corrupt offsets as soon
//! as a replacement changed the text length.

use std::cmp::Ordering;

use super::registry::SubstitutionRegistry;
use super::tags::canonical_tag;
use super::types::{AnonymizedText, PiiRecognizer, PiiSpan, ReplacementMode};
use super::RecognizerError;

pub struct EntityTagger {
    recognizer: Box<dyn PiiRecognizer>,
    registry: SubstitutionRegistry,
    mode: ReplacementMode,
    entities: Vec<String>,
    language: String,
}

impl EntityTagger {
    pub fn new(
        recognizer: Box<dyn PiiRecognizer>,
        registry: SubstitutionRegistry,
        mode: ReplacementMode,
        entities: Vec<String>,
        language: &str,
    ) -> Self {
        Self {
            recognizer,
            registry,
            mode,
            entities,
            language: language.to_string(),
        }
    }

    /// Anonymize one text value.
    ///
    /// Empty or whitespace-only text is returned unchanged with zero
    /// entities, skipping the recognizer call entirely.
    pub fn anonymize(&mut self, text: &str) -> Result<AnonymizedText, RecognizerError> {
        let word_count = text.split_whitespace().count();

        if text.trim().is_empty() {
            return Ok(AnonymizedText {
                text: text.to_string(),
                entity_count: 0,
                word_count: 0,
            });
        }

        let spans = self
            .recognizer
            .detect(text, &self.language, &self.entities)?;
        let plan = resolve_overlaps(spans, text.chars().count());

        let byte_of: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let byte_at = |c: usize| byte_of.get(c).copied().unwrap_or(text.len());

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0usize;
        for span in &plan {
            out.push_str(&text[byte_at(cursor)..byte_at(span.start)]);
            let original = &text[byte_at(span.start)..byte_at(span.end)];
            let replacement = match self.mode {
                ReplacementMode::Tags => canonical_tag(&span.entity_type),
                ReplacementMode::FakeValues => self.registry.resolve(&span.entity_type, original),
            };
            out.push_str(&replacement);
            cursor = span.end;
        }
        out.push_str(&text[byte_at(cursor)..]);

        Ok(AnonymizedText {
            text: out,
            entity_count: plan.len(),
            word_count,
        })
    }

    /// Clear the substitution registry. Call between input files.
    pub fn reset_registry(&mut self) {
        self.registry.reset();
    }
}

/// Keep a non-overlapping subset of the detected spans, preferring higher
/// scores, ordered by start offset. Offsets are clamped to the text length;
/// empty spans are dropped.
fn resolve_overlaps(spans: Vec<PiiSpan>, char_len: usize) -> Vec<PiiSpan> {
    let mut candidates: Vec<PiiSpan> = spans
        .into_iter()
        .map(|mut s| {
            s.start = s.start.min(char_len);
            s.end = s.end.min(char_len);
            s
        })
        .filter(|s| s.start < s.end)
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.start.cmp(&b.start))
    });

    let mut kept: Vec<PiiSpan> = Vec::new();
    for span in candidates {
        if kept
            .iter()
            .all(|k| span.end <= k.start || span.start >= k.end)
        {
            kept.push(span);
        }
    }
    kept.sort_by_key(|s| s.start);
    kept
}
