use std::collections::HashMap;

use orderlens_reader::{OrderRecord, ProductRecord, Row};

/// Inner join on `orders.product_id == products.objectID`, producing one
/// merged row per surviving order. Post-dedup each key maps to at most one
/// product, so the join never fans out, and the referential filter already
/// guarantees a match for every order fed in here. Order columns come
/// first; the product's `objectID` is kept, duplicating `product_id`.
pub fn join_orders_with_products(
    orders: &[OrderRecord],
    products: &[ProductRecord],
) -> Vec<Row> {
    let by_id: HashMap<&str, &ProductRecord> = products
        .iter()
        .map(|product| (product.object_id.as_str(), product))
        .collect();

    let mut merged = Vec::with_capacity(orders.len());
    for order in orders {
        let Some(product) = by_id.get(order.product_id.as_str()) else {
            continue;
        };
        let mut row = order.to_row();
        for (key, value) in product.to_row() {
            row.entry(key).or_insert(value);
        }
        merged.push(row);
    }
    merged
}
