use serde::Serialize;

/// Why a record left (or stayed in) the candidate set.
///
/// Exactly one verdict is assigned per record per run; the variants are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum FilterVerdict {
    /// Survived every stage.
    Kept,
    /// Kept unchanged because the AI call failed or its result block could
    /// not be parsed (fail-open).
    KeptAiFallback,
    /// The description is mostly redacted PII.
    RejectedTagDensity { density: f64 },
    /// The resolution matched a boilerplate phrase.
    RejectedDenylist { phrase: String },
    /// The remote classifier judged the record not useful.
    RejectedAi,
}

impl FilterVerdict {
    pub fn is_kept(&self) -> bool {
        matches!(self, FilterVerdict::Kept | FilterVerdict::KeptAiFallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kept_variants() {
        assert!(FilterVerdict::Kept.is_kept());
        assert!(FilterVerdict::KeptAiFallback.is_kept());
        assert!(!FilterVerdict::RejectedAi.is_kept());
        assert!(!FilterVerdict::RejectedTagDensity { density: 0.8 }.is_kept());
    }

    #[test]
    fn verdict_serializes_with_reason_payload() {
        let verdict = FilterVerdict::RejectedDenylist {
            phrase: "attendere".into(),
        };
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("rejected_denylist"));
        assert!(json.contains("attendere"));
    }
}
