use std::collections::HashSet;

use orderlens_reader::{OrderRecord, ProductRecord};

/// The set of valid foreign keys: every `objectID` in the deduplicated
/// catalog. Built from the in-memory records, never by re-reading the
/// serialized table.
pub fn product_id_set(products: &[ProductRecord]) -> HashSet<String> {
    products
        .iter()
        .map(|product| product.object_id.clone())
        .collect()
}

/// Keeps only orders whose `product_id` references a known product. Dropped
/// orders are expected churn, not errors, so nothing is logged per record.
/// Must run against the deduplicated set; validity is defined there.
pub fn filter_orders(orders: Vec<OrderRecord>, valid_ids: &HashSet<String>) -> Vec<OrderRecord> {
    orders
        .into_iter()
        .filter(|order| valid_ids.contains(&order.product_id))
        .collect()
}
