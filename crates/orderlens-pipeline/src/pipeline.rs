use std::path::PathBuf;

use orderlens_reader::{read_orders, read_products, OrderRecord, ProductRecord, Row};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::dedup::dedup_products;
use crate::filter::{filter_orders, product_id_set};
use crate::join::join_orders_with_products;
use crate::materialize::write_table;
use crate::normalize::normalize_orders;

pub const ALL_ORDERS_FILE: &str = "all_orders.csv";
pub const ALL_PRODUCTS_FILE: &str = "all_products.csv";
pub const MERGED_FILE: &str = "orders_with_products.csv";

/// Failures that terminate a run. Everything upstream of the output writes
/// is handled per file or per record and never reaches the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write table {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to finish table {path}: {source}")]
    Finish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the semicolon-delimited order files, arbitrarily nested.
    pub orders_dir: PathBuf,
    /// Root of the JSON product catalog fragments, arbitrarily nested.
    pub products_dir: PathBuf,
    /// Where the three tabular artifacts are (over)written.
    pub output_dir: PathBuf,
}

/// Counters describing one completed run, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub orders_read: usize,
    pub products_read: usize,
    pub duplicate_products_dropped: usize,
    pub orders_dropped_by_filter: usize,
    pub merged_rows: usize,
}

/// One sequential reconciliation run: read everything, transform in memory,
/// overwrite all outputs. Re-running from scratch is the recovery story for
/// any interruption; there are no checkpoints and no partial-write repair.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let orders = read_orders(&self.config.orders_dir);
        let orders_read = orders.len();
        info!(count = orders_read, "loaded order records");
        self.write_orders(&orders)?;

        let products = read_products(&self.config.products_dir);
        let products_read = products.len();
        info!(count = products_read, "loaded product records");

        let products = dedup_products(products);
        let duplicate_products_dropped = products_read - products.len();
        self.write_rows(ALL_PRODUCTS_FILE, products.iter().map(ProductRecord::to_row))?;

        // Referential validity is defined against the deduplicated set we
        // already hold in memory, not against the file just written.
        let valid_ids = product_id_set(&products);
        let mut orders = filter_orders(orders, &valid_ids);
        let orders_dropped_by_filter = orders_read - orders.len();
        self.write_orders(&orders)?;

        normalize_orders(&mut orders);

        let merged = join_orders_with_products(&orders, &products);
        let merged_rows = merged.len();
        self.write_rows(MERGED_FILE, merged.into_iter())?;

        let summary = RunSummary {
            orders_read,
            products_read,
            duplicate_products_dropped,
            orders_dropped_by_filter,
            merged_rows,
        };
        info!(?summary, "reconciliation run complete");
        Ok(summary)
    }

    fn write_orders(&self, orders: &[OrderRecord]) -> Result<(), PipelineError> {
        self.write_rows(ALL_ORDERS_FILE, orders.iter().map(OrderRecord::to_row))
    }

    fn write_rows(
        &self,
        file_name: &str,
        rows: impl Iterator<Item = Row>,
    ) -> Result<(), PipelineError> {
        let rows: Vec<Row> = rows.collect();
        let path = self.config.output_dir.join(file_name);
        write_table(&path, &rows)?;
        info!(path = %path.display(), rows = rows.len(), "wrote table");
        Ok(())
    }
}
