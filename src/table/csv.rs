//! CSV export.
//!
//! Every field is double-quoted with embedded quotes doubled, and lines are
//! joined with `\n`. The first line is the record type's fixed header. Quoted
//! fields may span lines, so payloads are read back record by record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use super::TableRecord;

/// Quote a single field.
pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Join fields into one quoted CSV line.
pub fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the CSV payload for a set of rows.
pub fn build_csv<R: TableRecord>(rows: &[&R]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(R::csv_header()));
    for row in rows {
        lines.push(csv_line(&row.csv_record()));
    }
    lines.join("\n")
}

/// Split a whole payload into records.
///
/// Newlines inside quoted fields belong to the field. Blank lines are skipped
/// and a `\r` before a record break is dropped.
pub fn split_csv_records(payload: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = payload.chars().peekable();

    let mut finish = |fields: &mut Vec<String>, current: &mut String| {
        fields.push(std::mem::take(current));
        let record = std::mem::take(fields);
        if !(record.len() == 1 && record[0].trim().is_empty()) {
            records.push(record);
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => finish(&mut fields, &mut current),
            _ => current.push(c),
        }
    }
    finish(&mut fields, &mut current);
    records
}

/// File name for an export of `prefix` made now.
pub fn export_file_name(prefix: &str) -> String {
    format!("{}_{}.csv", prefix, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write an export of `rows` into `dir` and return the file path.
pub fn write_csv<R: TableRecord>(dir: &Path, prefix: &str, rows: &[&R]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(prefix));
    fs::write(&path, build_csv(rows))?;
    info!(rows = rows.len(), path = %path.display(), "Exported CSV");
    debug!(prefix, "CSV export complete");
    Ok(path)
}
