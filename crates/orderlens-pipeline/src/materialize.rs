use std::fs;
use std::path::Path;

use orderlens_reader::Row;
use serde_json::Value;

use crate::pipeline::PipelineError;

/// First pass over a batch: the union of all keys across its rows, in
/// first-seen order. Computed once per batch so the schema never shifts
/// between header and data rows.
pub fn column_union(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Writes a batch of heterogeneous rows as a comma-separated UTF-8 table
/// with a header row. A row missing a column gets an empty cell. The
/// destination is fully overwritten; a failure here is fatal to the run and
/// the caller is expected to re-run the whole batch.
pub fn write_table(path: &Path, rows: &[Row]) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| PipelineError::OutputDir {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    let columns = column_union(rows);

    let mut writer = csv::Writer::from_path(path).map_err(|err| PipelineError::Write {
        path: path.to_path_buf(),
        source: err,
    })?;

    if !columns.is_empty() {
        writer
            .write_record(&columns)
            .map_err(|err| PipelineError::Write {
                path: path.to_path_buf(),
                source: err,
            })?;
    }

    for row in rows {
        let record: Vec<String> = columns.iter().map(|column| cell(row.get(column))).collect();
        writer
            .write_record(&record)
            .map_err(|err| PipelineError::Write {
                path: path.to_path_buf(),
                source: err,
            })?;
    }

    writer.flush().map_err(|err| PipelineError::Finish {
        path: path.to_path_buf(),
        source: err,
    })
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
