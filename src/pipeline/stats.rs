use serde::Serialize;

/// Counters accumulated across one pipeline run.
///
/// Initialized at run start, incremented during phases, reported at run
/// end; never persisted beyond the run's log output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub rows_processed: usize,
    /// Rows where the tagger replaced at least one span.
    pub rows_with_pii: usize,
    pub entities_found: usize,
    pub rejected_tag_density: usize,
    pub rejected_denylist: usize,
    pub rejected_ai: usize,
    /// Rows kept by the fail-open fallback (call or block-parse failure).
    pub ai_fallback_kept: usize,
    pub ai_corrections: usize,
    pub rows_kept: usize,
    /// True when Phase 3 did not run at all (collaborator absent).
    /// Distinguishes "skipped" from "ran and kept everything".
    pub ai_skipped: bool,
}

impl PipelineStats {
    pub fn log_summary(&self) {
        tracing::info!(
            rows_processed = self.rows_processed,
            rows_with_pii = self.rows_with_pii,
            entities_found = self.entities_found,
            rejected_tag_density = self.rejected_tag_density,
            rejected_denylist = self.rejected_denylist,
            rejected_ai = self.rejected_ai,
            ai_fallback_kept = self.ai_fallback_kept,
            ai_corrections = self.ai_corrections,
            rows_kept = self.rows_kept,
            ai_skipped = self.ai_skipped,
            "pipeline run complete"
        );
    }
}
