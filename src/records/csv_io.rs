//! CSV source and sink.
//!
//! The header is read once and written back verbatim; ragged rows are
//! padded or truncated to the header width so positional field access
//! stays aligned.

use std::path::{Path, PathBuf};

use chrono::Local;

use super::{Record, RecordError, RecordSet};

/// Read a CSV file into a [`RecordSet`], optionally stopping after
/// `row_limit` data rows (dry runs).
pub fn read_csv(path: &Path, row_limit: Option<usize>) -> Result<RecordSet, RecordError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let width = headers.len();

    let mut records = Vec::new();
    for row in reader.records() {
        if let Some(limit) = row_limit {
            if records.len() >= limit {
                break;
            }
        }
        let row = row?;
        let mut values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        values.resize(width, String::new());
        values.truncate(width);
        records.push(Record::new(values));
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "read CSV input");
    Ok(RecordSet::new(headers, records))
}

/// Write a [`RecordSet`] back out, header first.
pub fn write_csv(path: &Path, set: &RecordSet) -> Result<(), RecordError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&set.headers)?;
    for record in &set.records {
        writer.write_record(&record.values)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = set.len(), "wrote CSV output");
    Ok(())
}

/// Output path for an anonymized file: `<stem>_anonymized_<YYYY_MM_DD><ext>`
/// inside `output_dir`.
pub fn dated_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = Local::now().format("%Y_%m_%d");
    output_dir.join(format!("{stem}_anonymized_{stamp}{ext}"))
}
