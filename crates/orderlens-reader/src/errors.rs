use std::path::PathBuf;

use thiserror::Error;

/// Per-file failure raised while reading raw order or product files.
///
/// These never abort a batch: the directory walkers log the error, skip the
/// file, and keep going.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed product file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
