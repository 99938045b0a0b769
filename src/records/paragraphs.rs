//! Paragraph export for knowledge-base ingestion.
//!
//! Each record becomes a block of `header: value` lines followed by a
//! separator. Records with an empty required column are skipped — a
//! knowledge-base entry without its question or answer is useless.

use super::{RecordError, RecordSet};

/// Default block separator.
pub const DEFAULT_SEPARATOR: &str = "===";

/// Result of a paragraph export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphExport {
    pub text: String,
    pub rows_read: usize,
    pub paragraphs_written: usize,
}

/// Convert a record set into paragraph blocks.
///
/// `require_columns` lists header names that must be non-empty for a record
/// to be included; all columns are written for included records. An empty
/// list requires every column.
pub fn to_paragraphs(
    set: &RecordSet,
    require_columns: &[String],
    separator: &str,
) -> Result<ParagraphExport, RecordError> {
    let required: Vec<usize> = if require_columns.is_empty() {
        (0..set.headers.len()).collect()
    } else {
        require_columns
            .iter()
            .map(|name| set.require_column(name))
            .collect::<Result<_, _>>()?
    };

    let mut blocks = Vec::new();
    for record in &set.records {
        if required.iter().any(|&c| record.get(c).trim().is_empty()) {
            continue;
        }
        let lines: Vec<String> = set
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{}: {}", h, record.get(i).trim()))
            .collect();
        blocks.push(format!("{}\n{}", lines.join("\n"), separator));
    }

    let mut text = blocks.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }

    Ok(ParagraphExport {
        text,
        rows_read: set.len(),
        paragraphs_written: blocks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn sample() -> RecordSet {
        RecordSet::new(
            vec!["oggetto".into(), "soluzione".into()],
            vec![
                Record::new(vec!["stampante".into(), "riavvio spooler".into()]),
                Record::new(vec!["accesso".into(), "   ".into()]),
                Record::new(vec!["posta".into(), "quota aumentata".into()]),
            ],
        )
    }

    #[test]
    fn blocks_have_header_value_lines_and_separator() {
        let export = to_paragraphs(&sample(), &[], DEFAULT_SEPARATOR).unwrap();
        assert_eq!(export.rows_read, 3);
        assert_eq!(export.paragraphs_written, 2);
        assert!(export.text.contains("oggetto: stampante"));
        assert!(export.text.contains("soluzione: riavvio spooler"));
        assert!(export.text.contains("==="));
        assert!(export.text.ends_with("===\n"));
    }

    #[test]
    fn rows_with_empty_required_column_are_skipped() {
        let export = to_paragraphs(&sample(), &["soluzione".to_string()], DEFAULT_SEPARATOR).unwrap();
        assert_eq!(export.paragraphs_written, 2);
        assert!(!export.text.contains("accesso"));
    }

    #[test]
    fn requiring_only_some_columns_keeps_partial_rows() {
        let export = to_paragraphs(&sample(), &["oggetto".to_string()], DEFAULT_SEPARATOR).unwrap();
        assert_eq!(export.paragraphs_written, 3);
    }

    #[test]
    fn unknown_required_column_is_an_error() {
        let err = to_paragraphs(&sample(), &["priorità".to_string()], DEFAULT_SEPARATOR).unwrap_err();
        assert!(matches!(err, RecordError::MissingColumn(_)));
    }

    #[test]
    fn empty_set_produces_empty_text() {
        let set = RecordSet::new(vec!["a".into()], vec![]);
        let export = to_paragraphs(&set, &[], DEFAULT_SEPARATOR).unwrap();
        assert!(export.text.is_empty());
        assert_eq!(export.paragraphs_written, 0);
    }
}
