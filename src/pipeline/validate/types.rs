use super::ValidateError;

/// One record submitted to the batch validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Original row index in the input set — results are merged back by
    /// this key, never by batch-arrival order.
    pub row_index: usize,
    pub text: String,
}

/// Per-row outcome merged back from a batch response.
#[derive(Debug, Clone, PartialEq)]
pub struct RowVerdict {
    pub row_index: usize,
    pub useful: bool,
    /// Replacement text when the model corrected residual PII; `None`
    /// when the text is to be kept as-is.
    pub corrected: Option<String>,
    /// True when this verdict came from the fail-open fallback rather
    /// than a successfully parsed result block.
    pub fallback: bool,
}

impl RowVerdict {
    /// The fail-open verdict: kept unchanged, marked useful.
    pub fn fallback(row_index: usize) -> Self {
        Self {
            row_index,
            useful: true,
            corrected: None,
            fallback: true,
        }
    }
}

/// Remote chat-completion abstraction (allows mocking).
pub trait ChatClient {
    fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ValidateError>;
}
