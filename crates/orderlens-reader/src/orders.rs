use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::coerce::normalize_timestamp;
use crate::errors::ReaderError;
use crate::model::{OrderRecord, Row};
use crate::walk::discover_files;

/// Raw order files are semicolon-delimited so embedded commas in city names
/// and product labels never split a field.
pub const ORDER_FILE_DELIMITER: u8 = b';';

/// Parses every `.csv` file under `dir` into order records. Files that fail
/// to parse are logged and skipped; the rest of the batch proceeds.
pub fn read_orders(dir: &Path) -> Vec<OrderRecord> {
    let mut orders = Vec::new();
    for path in discover_files(dir, "csv") {
        match parse_order_file(&path) {
            Ok(parsed) => orders.extend(parsed),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable order file");
            }
        }
    }
    orders
}

/// Parses a single delimited order file. Timestamps matching the source
/// layout are rewritten to the canonical form here; anything else is kept
/// verbatim and left for later inspection.
pub fn parse_order_file(path: &Path) -> Result<Vec<OrderRecord>, ReaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(ORDER_FILE_DELIMITER)
        .flexible(true)
        .from_path(path)
        .map_err(|err| ReaderError::Csv {
            path: path.to_path_buf(),
            source: err,
        })?;

    let headers = reader
        .headers()
        .map_err(|err| ReaderError::Csv {
            path: path.to_path_buf(),
            source: err,
        })?
        .clone();

    let mut orders = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| ReaderError::Csv {
            path: path.to_path_buf(),
            source: err,
        })?;

        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), Value::String(value.to_string()));
        }

        let mut order = OrderRecord::from_row(row);
        order.timestamp = order.timestamp.map(|ts| normalize_timestamp(&ts));
        orders.push(order);
    }

    Ok(orders)
}
