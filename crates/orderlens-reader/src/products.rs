use std::fs;
use std::path::Path;

use tracing::warn;

use crate::errors::ReaderError;
use crate::model::ProductRecord;
use crate::walk::discover_files;

/// Parses every `.json` file under `dir` as an array of product records and
/// concatenates the results. A structurally broken file is logged and
/// skipped entirely; the rest of the batch proceeds.
pub fn read_products(dir: &Path) -> Vec<ProductRecord> {
    let mut products = Vec::new();
    for path in discover_files(dir, "json") {
        match parse_product_file(&path) {
            Ok(parsed) => products.extend(parsed),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable product file");
            }
        }
    }
    products
}

pub fn parse_product_file(path: &Path) -> Result<Vec<ProductRecord>, ReaderError> {
    let contents = fs::read_to_string(path).map_err(|err| ReaderError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_str(&contents).map_err(|err| ReaderError::Json {
        path: path.to_path_buf(),
        source: err,
    })
}
