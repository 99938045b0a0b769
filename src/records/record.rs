use serde::Serialize;

use super::RecordError;

/// One data row. Field values are aligned positionally with the owning
/// [`RecordSet`] header; a record's identity is its index in the input set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub values: Vec<String>,
}

impl Record {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn get(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: usize, value: String) {
        if let Some(slot) = self.values.get_mut(column) {
            *slot = value;
        }
    }

    /// Concatenation of the given columns, newline-joined, skipping empties.
    /// This is the combined text used downstream of tagging (paragraph
    /// export, diagnostics).
    pub fn combined_text(&self, columns: &[usize]) -> String {
        columns
            .iter()
            .map(|&c| self.get(c))
            .filter(|v| !v.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An ordered record collection sharing one header schema.
///
/// The header is preserved verbatim from input to output; the pipeline
/// mutates field values only, never field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Column index for `name`, or the run-fatal missing-column error.
    pub fn require_column(&self, name: &str) -> Result<usize, RecordError> {
        self.column_index(name)
            .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new(
            vec!["subject".into(), "description".into(), "resolution".into()],
            vec![
                Record::new(vec!["s1".into(), "d1".into(), "r1".into()]),
                Record::new(vec!["s2".into(), "".into(), "r2".into()]),
            ],
        )
    }

    #[test]
    fn column_lookup() {
        let set = sample();
        assert_eq!(set.column_index("description"), Some(1));
        assert_eq!(set.column_index("missing"), None);
        assert_eq!(set.require_column("resolution").unwrap(), 2);
    }

    #[test]
    fn missing_column_is_an_error() {
        let set = sample();
        let err = set.require_column("priority").unwrap_err();
        assert!(matches!(err, RecordError::MissingColumn(name) if name == "priority"));
    }

    #[test]
    fn get_out_of_range_is_empty() {
        let record = Record::new(vec!["a".into()]);
        assert_eq!(record.get(5), "");
    }

    #[test]
    fn combined_text_skips_empty_fields() {
        let set = sample();
        assert_eq!(set.records[0].combined_text(&[0, 1, 2]), "s1\nd1\nr1");
        assert_eq!(set.records[1].combined_text(&[0, 1, 2]), "s2\nr2");
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut record = Record::new(vec!["a".into()]);
        record.set(3, "x".into());
        assert_eq!(record.values, vec!["a".to_string()]);
    }
}
