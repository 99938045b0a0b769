//! Tag-density metric.
//!
//! A record whose description is mostly `[FAKE_*]` tags carries little
//! informative residual content — the interesting part of the text was the
//! PII itself, and it is gone.

use crate::pipeline::anonymize::tags::count_tags;

/// Fraction of whitespace tokens that are canonical tags, computed over an
/// already-anonymized text. Empty or whitespace-only text yields 0.0.
pub fn tag_density(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }
    count_tags(text) as f64 / words as f64
}

/// Density if it reaches the rejection threshold (inclusive), else `None`.
pub fn density_rejection(text: &str, threshold: f64) -> Option<f64> {
    let density = tag_density(text);
    (density >= threshold).then_some(density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_tags_out_of_ten_tokens_is_rejected_at_boundary() {
        let text = "[FAKE_PERSON] [FAKE_EMAIL] [FAKE_PHONE] [FAKE_IBAN] [FAKE_PERSON] [FAKE_VAT] ha chiesto il rinnovo";
        assert_eq!(text.split_whitespace().count(), 10);
        assert!((tag_density(text) - 0.6).abs() < f64::EPSILON);
        assert_eq!(density_rejection(text, 0.6), Some(0.6));
    }

    #[test]
    fn five_tags_out_of_ten_tokens_is_kept() {
        let text = "[FAKE_PERSON] [FAKE_EMAIL] [FAKE_PHONE] [FAKE_IBAN] [FAKE_PERSON] non riesce ad accedere oggi";
        assert_eq!(text.split_whitespace().count(), 10);
        assert!((tag_density(text) - 0.5).abs() < f64::EPSILON);
        assert_eq!(density_rejection(text, 0.6), None);
    }

    #[test]
    fn empty_text_has_zero_density() {
        assert_eq!(tag_density(""), 0.0);
        assert_eq!(tag_density("   \n\t"), 0.0);
        assert_eq!(density_rejection("", 0.6), None);
    }

    #[test]
    fn all_tags_is_density_one() {
        let text = "[FAKE_PERSON] [FAKE_EMAIL]";
        assert!((tag_density(text) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn plain_text_has_zero_density() {
        assert_eq!(tag_density("nessun dato personale qui"), 0.0);
    }
}
