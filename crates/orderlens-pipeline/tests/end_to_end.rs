use std::fs;
use std::path::Path;

use orderlens_pipeline::{
    Pipeline, PipelineConfig, ALL_ORDERS_FILE, ALL_PRODUCTS_FILE, MERGED_FILE,
};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, contents).expect("write fixture");
}

/// Two product files where "P1" appears in both, three orders referencing
/// P1, P2 and the unknown P3. Expected: one P1 kept, the P3 order dropped,
/// exactly two merged rows.
fn seed_inputs(root: &Path) {
    write(
        &root.join("downloads/orders/week1/orders.csv"),
        "order_id;customer_id;product_id;quantity;payment;payment_type;order_status;customer_city;timestamp\n\
         O-1;C-1;P1;1;19.90;credit_card;dereviled;Santiago;05-03-2024 14:30\n\
         O-2;C-2;P2;2;N/A;voucher;shipped;Temuco;06-03-2024 10:00\n\
         O-3;C-3;P3;1;7.00;credit_card;delivered;Arica;07-03-2024 08:15\n",
    );
    write(
        &root.join("downloads/products/a/records.json"),
        r#"[{"objectID": "P1", "name": "bottle", "categories": "kitchen", "rating": 4.5, "product_weight_g": 310.0}]"#,
    );
    write(
        &root.join("downloads/products/b/records.json"),
        r#"[
            {"objectID": "P1", "name": "bottle (duplicate)", "categories": "kitchen", "rating": 1.0, "product_weight_g": 300.0},
            {"objectID": "P2", "name": "backpack", "categories": "outdoor", "rating": 4.1, "product_weight_g": 980.0}
        ]"#,
    );
}

fn pipeline(root: &Path) -> Pipeline {
    Pipeline::new(PipelineConfig {
        orders_dir: root.join("downloads/orders"),
        products_dir: root.join("downloads/products"),
        output_dir: root.join("data"),
    })
}

fn read_table(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path)
        .unwrap_or_else(|err| panic!("failed to open {}: {err}", path.display()));
    let headers: Vec<String> = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

fn column<'a>(headers: &[String], row: &'a [String], name: &str) -> &'a str {
    let idx = headers
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("column {name} missing from {headers:?}"));
    &row[idx]
}

#[test]
fn reconciles_the_reference_scenario() {
    let root = tempfile::tempdir().expect("tempdir");
    seed_inputs(root.path());

    let summary = pipeline(root.path()).run().expect("run failed");
    assert_eq!(summary.orders_read, 3);
    assert_eq!(summary.products_read, 3);
    assert_eq!(summary.duplicate_products_dropped, 1);
    assert_eq!(summary.orders_dropped_by_filter, 1);
    assert_eq!(summary.merged_rows, 2);

    let (product_headers, product_rows) = read_table(&root.path().join("data").join(ALL_PRODUCTS_FILE));
    assert_eq!(product_rows.len(), 2);
    // First occurrence of P1 wins; the duplicate's fields are discarded.
    assert_eq!(column(&product_headers, &product_rows[0], "objectID"), "P1");
    assert_eq!(column(&product_headers, &product_rows[0], "name"), "bottle");
    assert_eq!(column(&product_headers, &product_rows[1], "objectID"), "P2");

    let (order_headers, order_rows) = read_table(&root.path().join("data").join(ALL_ORDERS_FILE));
    assert_eq!(order_rows.len(), 2);
    let ids: Vec<&str> = order_rows
        .iter()
        .map(|row| column(&order_headers, row, "product_id"))
        .collect();
    assert_eq!(ids, ["P1", "P2"]);
    // The intermediate table is post-filter but pre-normalization.
    assert_eq!(
        column(&order_headers, &order_rows[0], "order_status"),
        "dereviled"
    );
    assert_eq!(column(&order_headers, &order_rows[1], "payment"), "N/A");

    let (merged_headers, merged_rows) = read_table(&root.path().join("data").join(MERGED_FILE));
    assert_eq!(merged_rows.len(), 2);
    assert_eq!(
        column(&merged_headers, &merged_rows[0], "order_status"),
        "delivered"
    );
    assert_eq!(column(&merged_headers, &merged_rows[0], "payment"), "19.9");
    assert_eq!(column(&merged_headers, &merged_rows[1], "payment"), "");
    assert_eq!(column(&merged_headers, &merged_rows[0], "objectID"), "P1");
    assert_eq!(column(&merged_headers, &merged_rows[0], "name"), "bottle");
    assert_eq!(
        column(&merged_headers, &merged_rows[0], "timestamp"),
        "2024-03-05 14:30:00"
    );
}

#[test]
fn rerunning_the_pipeline_is_idempotent() {
    let root = tempfile::tempdir().expect("tempdir");
    seed_inputs(root.path());

    let pipeline = pipeline(root.path());
    let first = pipeline.run().expect("first run failed");
    let merged_path = root.path().join("data").join(MERGED_FILE);
    let after_first = fs::read_to_string(&merged_path).expect("read merged");

    let second = pipeline.run().expect("second run failed");
    let after_second = fs::read_to_string(&merged_path).expect("read merged again");

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
}

#[test]
fn empty_input_directories_produce_empty_artifacts() {
    let root = tempfile::tempdir().expect("tempdir");

    let summary = pipeline(root.path()).run().expect("run failed");
    assert_eq!(summary.orders_read, 0);
    assert_eq!(summary.products_read, 0);
    assert_eq!(summary.merged_rows, 0);

    for file in [ALL_ORDERS_FILE, ALL_PRODUCTS_FILE, MERGED_FILE] {
        assert!(root.path().join("data").join(file).exists());
    }
}
