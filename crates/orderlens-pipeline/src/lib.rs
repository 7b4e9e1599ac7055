pub mod dedup;
pub mod filter;
pub mod join;
pub mod materialize;
pub mod normalize;
pub mod pipeline;

pub use dedup::dedup_products;
pub use filter::{filter_orders, product_id_set};
pub use join::join_orders_with_products;
pub use materialize::{column_union, write_table};
pub use normalize::normalize_orders;
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, RunSummary, ALL_ORDERS_FILE, ALL_PRODUCTS_FILE,
    MERGED_FILE,
};
