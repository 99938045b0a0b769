//! Batched AI validation with an explicit fail-open contract.
//!
//! Contract: a remote-call failure keeps every record of the batch
//! unchanged and marked useful; a row whose result block is missing from a
//! partially parsed response is likewise kept unchanged and marked useful.
//! The only way a record is rejected here is an explicitly parsed
//! `USEFUL: NO` block — or a validation text too short to be worth a call,
//! which is rejected deterministically before the model is consulted.

use super::parser::{parse_batch_response, ParseOutcome};
use super::prompt::{build_batch_prompt, VALIDATION_SYSTEM_PROMPT};
use super::types::{BatchItem, ChatClient, RowVerdict};
use crate::config::PipelineConfig;

pub struct BatchValidator {
    client: Box<dyn ChatClient>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    min_text_chars: usize,
    truncate_chars: usize,
}

impl BatchValidator {
    pub fn new(client: Box<dyn ChatClient>, config: &PipelineConfig) -> Self {
        Self {
            client,
            model: config.ai_model.clone(),
            max_tokens: config.ai_max_tokens,
            temperature: config.ai_temperature,
            min_text_chars: config.ai_min_text_chars,
            truncate_chars: config.ai_truncate_chars,
        }
    }

    /// Validate one batch. Returns a verdict for every input item, in
    /// input order. Never fails — see the module contract.
    pub fn validate(&self, items: &[BatchItem]) -> Vec<RowVerdict> {
        let (short, eligible): (Vec<BatchItem>, Vec<BatchItem>) = items
            .iter()
            .cloned()
            .partition(|item| item.text.trim().chars().count() < self.min_text_chars);

        let mut verdicts: Vec<RowVerdict> = short
            .iter()
            .map(|item| {
                tracing::debug!(row = item.row_index, "text too short, rejected without AI call");
                RowVerdict {
                    row_index: item.row_index,
                    useful: false,
                    corrected: None,
                    fallback: false,
                }
            })
            .collect();

        if !eligible.is_empty() {
            verdicts.extend(self.validate_eligible(&eligible));
        }

        // Back to input order for the caller.
        verdicts.sort_by_key(|v| {
            items
                .iter()
                .position(|i| i.row_index == v.row_index)
                .unwrap_or(usize::MAX)
        });
        verdicts
    }

    fn validate_eligible(&self, eligible: &[BatchItem]) -> Vec<RowVerdict> {
        let prompt = build_batch_prompt(eligible, self.truncate_chars);

        let response = match self.client.complete(
            &self.model,
            VALIDATION_SYSTEM_PROMPT,
            &prompt,
            self.max_tokens,
            self.temperature,
        ) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    rows = eligible.len(),
                    "AI call failed; keeping whole batch unchanged (fail open)"
                );
                return eligible
                    .iter()
                    .map(|item| RowVerdict::fallback(item.row_index))
                    .collect();
            }
        };

        let expected: Vec<usize> = eligible.iter().map(|i| i.row_index).collect();
        let parsed = parse_batch_response(&response, &expected);
        match parsed.outcome {
            ParseOutcome::WellFormed => {}
            ParseOutcome::Partial => {
                tracing::warn!(
                    parsed = parsed.rows.len(),
                    expected = expected.len(),
                    "partial AI response; missing rows kept unchanged (fail open)"
                );
            }
            ParseOutcome::Unparseable => {
                tracing::warn!("unparseable AI response; keeping whole batch unchanged (fail open)");
            }
        }

        eligible
            .iter()
            .map(|item| match parsed.rows.get(&item.row_index) {
                Some(row) => RowVerdict {
                    row_index: item.row_index,
                    useful: row.useful,
                    // A correction counts only when the model returned
                    // something different from what it was given.
                    corrected: row.text.clone().filter(|t| t != &item.text),
                    fallback: false,
                },
                None => RowVerdict::fallback(item.row_index),
            })
            .collect()
    }
}
