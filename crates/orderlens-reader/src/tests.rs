use std::path::PathBuf;

use crate::coerce::{normalize_timestamp, parse_decimal, Coerced};
use crate::model::Payment;
use crate::{parse_order_file, read_orders, read_products};

fn fixture_dir(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(path)
}

#[test]
fn reads_nested_order_files() {
    let orders = read_orders(&fixture_dir("orders"));
    assert_eq!(orders.len(), 4);

    let first = &orders[0];
    assert_eq!(first.order_id, "O-1001");
    assert_eq!(first.product_id, "P1");
    assert_eq!(first.quantity, Some(2));
    assert_eq!(first.payment, Some(Payment::Raw("19.90".to_string())));
    assert_eq!(first.order_status.as_deref(), Some("dereviled"));
    assert_eq!(first.timestamp.as_deref(), Some("2024-03-05 14:30:00"));

    // The delimiter is a semicolon, so the embedded comma stays in the city.
    assert_eq!(first.customer_city.as_deref(), Some("Santiago, Centro"));
}

#[test]
fn malformed_timestamp_is_kept_verbatim() {
    let orders = read_orders(&fixture_dir("orders"));
    let odd = orders
        .iter()
        .find(|order| order.order_id == "O-1002")
        .expect("O-1002 missing");
    assert_eq!(odd.timestamp.as_deref(), Some("not-a-date"));
    assert_eq!(odd.payment, Some(Payment::Raw("N/A".to_string())));
}

#[test]
fn unexpected_columns_land_in_extra() {
    let orders = parse_order_file(&fixture_dir("orders/2024-04/orders.csv"))
        .expect("2024-04 file should parse");
    assert_eq!(orders.len(), 1);
    assert_eq!(
        orders[0].extra.get("coupon").and_then(|v| v.as_str()),
        Some("SPRING10")
    );
}

#[test]
fn reads_products_and_skips_broken_file() {
    let products = read_products(&fixture_dir("products"));

    // batch1 (P1, P2) + batch2 (P1 repeat, P4); the broken fragment and the
    // stray .txt file contribute nothing.
    assert_eq!(products.len(), 4);
    let p1_count = products.iter().filter(|p| p.object_id == "P1").count();
    assert_eq!(p1_count, 2);

    let p4 = products
        .iter()
        .find(|p| p.object_id == "P4")
        .expect("P4 missing");
    assert_eq!(
        p4.extra.get("supplier").and_then(|v| v.as_str()),
        Some("mugco")
    );
}

#[test]
fn missing_directory_yields_empty_batch() {
    let orders = read_orders(&fixture_dir("does-not-exist"));
    assert!(orders.is_empty());
    let products = read_products(&fixture_dir("also-missing"));
    assert!(products.is_empty());
}

#[test]
fn decimal_parse_is_tagged_not_fatal() {
    assert_eq!(parse_decimal("19.90"), Coerced::Parsed(19.90));
    match parse_decimal("N/A") {
        Coerced::Unparsed { raw, .. } => assert_eq!(raw, "N/A"),
        other => panic!("expected Unparsed, got {other:?}"),
    }
}

#[test]
fn timestamp_normalization_is_a_no_op_on_canonical_input() {
    assert_eq!(
        normalize_timestamp("05-03-2024 14:30"),
        "2024-03-05 14:30:00"
    );
    // Already-canonical and garbage inputs both pass through unchanged.
    assert_eq!(
        normalize_timestamp("2024-03-05 14:30:00"),
        "2024-03-05 14:30:00"
    );
    assert_eq!(normalize_timestamp("not-a-date"), "not-a-date");
}
