//! Deterministic pre-AI filter.
//!
//! Two checks in fixed order: tag density on the description, then the
//! denylist on the resolution. A record failing the first check is
//! rejected without running the second — every record gets exactly one
//! verdict.

use crate::config::PipelineConfig;

use super::denylist::denylist_match;
use super::density::density_rejection;
use super::types::FilterVerdict;

pub struct PreFilter {
    threshold: f64,
    denylist: Vec<String>,
}

impl PreFilter {
    pub fn new(threshold: f64, denylist: Vec<String>) -> Self {
        Self { threshold, denylist }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.tag_density_threshold, config.denylist.clone())
    }

    /// Verdict for one anonymized record.
    pub fn evaluate(&self, description: &str, resolution: &str) -> FilterVerdict {
        if let Some(density) = density_rejection(description, self.threshold) {
            return FilterVerdict::RejectedTagDensity { density };
        }
        if let Some(phrase) = denylist_match(resolution, &self.denylist) {
            return FilterVerdict::RejectedDenylist {
                phrase: phrase.to_string(),
            };
        }
        FilterVerdict::Kept
    }
}
