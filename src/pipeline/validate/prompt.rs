use super::types::BatchItem;

/// System instruction for the batch validation call: correct residual PII
/// with the canonical tag vocabulary, and judge usefulness for the
/// knowledge base. One result block per row, nothing else.
pub const VALIDATION_SYSTEM_PROMPT: &str = r#"
You are a data curation assistant for a help-desk knowledge base. The user
message contains ticket resolution texts, each wrapped in [ROW n]...[/ROW n]
delimiters where n is the row number.

For EVERY row, do exactly two things:
1. PII check: the texts were already anonymized, but some personal data may
   remain (names, email addresses, phone numbers, IBANs, fiscal codes,
   addresses). Replace any residual personal data with the matching tag from
   this vocabulary: [FAKE_PERSON] [FAKE_EMAIL] [FAKE_PHONE] [FAKE_IBAN]
   [FAKE_FISCAL_CODE] [FAKE_VAT] [FAKE_DOCUMENT] [FAKE_LOCATION]
   [FAKE_CREDIT_CARD]. Do not alter anything else.
2. Usefulness check: decide whether the text is a usable knowledge-base
   answer. USEFUL means informative and actionable (describes an actual
   resolution). NOT useful means generic, interlocutory, or unanswered
   ("we will look into it", bare references to other channels, empty
   pleasantries).

Answer with EXACTLY one block per row, in this format and nothing more:

[RESULT n]
USEFUL: YES or NO
TEXT: the corrected text, or INVARIATO if you changed nothing
[/RESULT n]
"#;

/// Wrap one record's text in its row delimiter, truncated to `cap` chars.
pub fn wrap_row(row_index: usize, text: &str, cap: usize) -> String {
    let truncated: String = text.chars().take(cap).collect();
    format!("[ROW {row_index}]\n{truncated}\n[/ROW {row_index}]")
}

/// Concatenate a batch into one user prompt.
pub fn build_batch_prompt(items: &[BatchItem], cap: usize) -> String {
    items
        .iter()
        .map(|item| wrap_row(item.row_index, &item.text, cap))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::validate::parser::INVARIANT_MARKER;

    fn item(row_index: usize, text: &str) -> BatchItem {
        BatchItem {
            row_index,
            text: text.to_string(),
        }
    }

    #[test]
    fn rows_are_wrapped_with_their_original_index() {
        let prompt = build_batch_prompt(
            &[item(3, "primo testo"), item(7, "secondo testo")],
            2000,
        );
        assert!(prompt.contains("[ROW 3]\nprimo testo\n[/ROW 3]"));
        assert!(prompt.contains("[ROW 7]\nsecondo testo\n[/ROW 7]"));
    }

    #[test]
    fn long_texts_are_truncated_to_the_cap() {
        let long = "x".repeat(5000);
        let prompt = build_batch_prompt(&[item(0, &long)], 2000);
        assert!(prompt.chars().count() < 2100);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let accented = "è".repeat(30);
        let wrapped = wrap_row(1, &accented, 10);
        assert!(wrapped.contains(&"è".repeat(10)));
        assert!(!wrapped.contains(&"è".repeat(11)));
    }

    #[test]
    fn system_prompt_names_the_grammar_and_marker() {
        assert!(VALIDATION_SYSTEM_PROMPT.contains("[RESULT n]"));
        assert!(VALIDATION_SYSTEM_PROMPT.contains("USEFUL: YES or NO"));
        assert!(VALIDATION_SYSTEM_PROMPT.contains(INVARIANT_MARKER));
        assert!(VALIDATION_SYSTEM_PROMPT.contains("[FAKE_PERSON]"));
    }
}
