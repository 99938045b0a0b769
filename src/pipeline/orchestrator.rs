//! Three-phase pipeline orchestrator.
//!
//! Phase 1 tags PII in every configured field, Phase 2 applies the
//! deterministic pre-filter, Phase 3 runs batched AI validation. Phases
//! execute in strict order over the whole record set; the surviving
//! records keep their input order and the input header schema.

use std::collections::HashMap;

use crate::config::PipelineConfig;
use crate::records::{RecordError, RecordSet};

use super::anonymize::{
    EntityTagger, ItalianFaker, PiiRecognizer, ReplacementMode, SubstitutionRegistry,
};
use super::filter::{FilterVerdict, PreFilter};
use super::stats::PipelineStats;
use super::validate::{BatchItem, BatchValidator, ChatClient};

/// Output of one pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Surviving records, input order, input header schema.
    pub output: RecordSet,
    /// Every input row's verdict, indexed by original row position.
    pub verdicts: Vec<FilterVerdict>,
    pub stats: PipelineStats,
}

pub struct CuratorPipeline {
    config: PipelineConfig,
    tagger: EntityTagger,
    prefilter: PreFilter,
    validator: Option<BatchValidator>,
}

impl CuratorPipeline {
    /// Build a pipeline. Passing `None` for the chat client puts the run
    /// in AI-skipped mode: Phase 3 does not execute and pre-filter
    /// survivors pass through unchanged.
    pub fn new(
        config: PipelineConfig,
        recognizer: Box<dyn PiiRecognizer>,
        chat: Option<Box<dyn ChatClient>>,
    ) -> Self {
        let tagger = EntityTagger::new(
            recognizer,
            SubstitutionRegistry::new(Box::new(ItalianFaker::new())),
            ReplacementMode::Tags,
            config.entities.clone(),
            &config.language,
        );
        let prefilter = PreFilter::from_config(&config);
        let validator = chat.map(|client| BatchValidator::new(client, &config));
        Self {
            config,
            tagger,
            prefilter,
            validator,
        }
    }

    /// Reset run-scoped state (the substitution registry). Call between
    /// input files.
    pub fn reset(&mut self) {
        self.tagger.reset_registry();
    }

    /// Run all phases over `input`.
    ///
    /// Fails only on input-schema problems (a designated column missing
    /// from the header); collaborator failures degrade per their own
    /// contracts and never abort the run.
    pub fn run(&mut self, mut input: RecordSet) -> Result<RunOutcome, RecordError> {
        let field_indices: Vec<usize> = self
            .config
            .anonymize_fields
            .iter()
            .map(|name| input.require_column(name))
            .collect::<Result<_, _>>()?;
        let description_idx = input.require_column(&self.config.description_field)?;
        let resolution_idx = input.require_column(&self.config.resolution_field)?;

        if let Some(limit) = self.config.row_limit {
            if input.records.len() > limit {
                tracing::info!(limit, total = input.records.len(), "row limit active");
                input.records.truncate(limit);
            }
        }

        let headers = input.headers.clone();
        let mut stats = PipelineStats {
            rows_processed: input.records.len(),
            ..Default::default()
        };
        let mut verdicts = vec![FilterVerdict::Kept; input.records.len()];

        // Phase 1: tag every configured field of every record.
        {
            let _span = tracing::info_span!("phase_tag").entered();
            for (row, record) in input.records.iter_mut().enumerate() {
                let mut row_entities = 0;
                for &col in &field_indices {
                    let value = record.get(col).to_string();
                    match self.tagger.anonymize(&value) {
                        Ok(result) => {
                            row_entities += result.entity_count;
                            record.set(col, result.text);
                        }
                        Err(e) => {
                            // Conservative degradation: the field stays
                            // unanonymized, the run continues.
                            tracing::warn!(
                                row,
                                column = %headers[col],
                                error = %e,
                                "recognizer failed; field left unanonymized"
                            );
                        }
                    }
                }
                stats.entities_found += row_entities;
                if row_entities > 0 {
                    stats.rows_with_pii += 1;
                }
            }
        }

        // Phase 2: deterministic pre-filter, input order.
        let mut survivors: Vec<usize> = Vec::new();
        {
            let _span = tracing::info_span!("phase_prefilter").entered();
            for (row, record) in input.records.iter().enumerate() {
                let verdict = self
                    .prefilter
                    .evaluate(record.get(description_idx), record.get(resolution_idx));
                match &verdict {
                    FilterVerdict::Kept => survivors.push(row),
                    FilterVerdict::RejectedTagDensity { density } => {
                        stats.rejected_tag_density += 1;
                        tracing::debug!(row, density, "rejected: tag density");
                    }
                    FilterVerdict::RejectedDenylist { phrase } => {
                        stats.rejected_denylist += 1;
                        tracing::debug!(row, phrase = %phrase, "rejected: denylist");
                    }
                    _ => {}
                }
                verdicts[row] = verdict;
            }
        }

        // Phase 3: batched AI validation, merged back by original row
        // index — never by batch-arrival order.
        let mut ai_verdicts = HashMap::new();
        match &self.validator {
            None => {
                stats.ai_skipped = true;
                tracing::warn!(
                    survivors = survivors.len(),
                    "AI validation unavailable; phase skipped, all pre-filter survivors kept"
                );
            }
            Some(validator) => {
                let _span = tracing::info_span!("phase_ai_validate").entered();
                let items: Vec<BatchItem> = survivors
                    .iter()
                    .map(|&row| BatchItem {
                        row_index: row,
                        text: input.records[row].get(resolution_idx).to_string(),
                    })
                    .collect();
                let batch_size = self.config.ai_batch_size.max(1);
                for (i, batch) in items.chunks(batch_size).enumerate() {
                    if i > 0 {
                        if let Some(ms) = self.config.ai_batch_delay_ms {
                            std::thread::sleep(std::time::Duration::from_millis(ms));
                        }
                    }
                    tracing::info!(batch = i + 1, rows = batch.len(), "validating batch");
                    for verdict in validator.validate(batch) {
                        ai_verdicts.insert(verdict.row_index, verdict);
                    }
                }
            }
        }

        let mut kept_records = Vec::new();
        for row in survivors {
            let verdict = if stats.ai_skipped {
                FilterVerdict::Kept
            } else {
                match ai_verdicts.remove(&row) {
                    Some(v) if !v.useful => {
                        stats.rejected_ai += 1;
                        FilterVerdict::RejectedAi
                    }
                    Some(v) => {
                        if let Some(corrected) = v.corrected {
                            input.records[row].set(resolution_idx, corrected);
                            stats.ai_corrections += 1;
                        }
                        if v.fallback {
                            stats.ai_fallback_kept += 1;
                            FilterVerdict::KeptAiFallback
                        } else {
                            FilterVerdict::Kept
                        }
                    }
                    None => FilterVerdict::Kept,
                }
            };
            if verdict.is_kept() {
                kept_records.push(input.records[row].clone());
            }
            verdicts[row] = verdict;
        }
        stats.rows_kept = kept_records.len();
        stats.log_summary();

        Ok(RunOutcome {
            output: RecordSet::new(headers, kept_records),
            verdicts,
            stats,
        })
    }
}
