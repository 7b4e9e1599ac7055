use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// One tabular row keyed by column name, insertion order preserved.
pub type Row = Map<String, Value>;

/// A payment amount as it moves through the pipeline: raw text straight off
/// the delimited file, or the numeric value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Payment {
    Amount(f64),
    Raw(String),
}

impl Payment {
    fn to_value(&self) -> Value {
        match self {
            Payment::Amount(amount) => number(*amount),
            Payment::Raw(raw) => Value::String(raw.clone()),
        }
    }
}

/// One purchase-line event. `order_id` is not globally unique: an order
/// spanning several products produces one record per line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: Option<u32>,
    pub payment: Option<Payment>,
    pub payment_type: Option<String>,
    pub order_status: Option<String>,
    pub customer_city: Option<String>,
    pub timestamp: Option<String>,
    /// Columns the source file carried beyond the known set.
    pub extra: Row,
}

impl OrderRecord {
    /// Builds a record from a raw header/value map. Unknown columns land in
    /// `extra`; empty cells become missing values.
    pub fn from_row(mut row: Row) -> Self {
        let quantity = take(&mut row, "quantity").and_then(|q| q.trim().parse::<u32>().ok());
        let payment = take(&mut row, "payment").map(Payment::Raw);

        Self {
            order_id: take(&mut row, "order_id").unwrap_or_default(),
            customer_id: take(&mut row, "customer_id").unwrap_or_default(),
            product_id: take(&mut row, "product_id").unwrap_or_default(),
            quantity,
            payment,
            payment_type: take(&mut row, "payment_type"),
            order_status: take(&mut row, "order_status"),
            customer_city: take(&mut row, "customer_city"),
            timestamp: take(&mut row, "timestamp"),
            extra: row,
        }
    }

    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("order_id".into(), Value::String(self.order_id.clone()));
        row.insert("customer_id".into(), Value::String(self.customer_id.clone()));
        row.insert("product_id".into(), Value::String(self.product_id.clone()));
        row.insert(
            "quantity".into(),
            self.quantity.map(Value::from).unwrap_or(Value::Null),
        );
        row.insert(
            "payment".into(),
            self.payment
                .as_ref()
                .map(Payment::to_value)
                .unwrap_or(Value::Null),
        );
        row.insert("payment_type".into(), string_or_null(&self.payment_type));
        row.insert("order_status".into(), string_or_null(&self.order_status));
        row.insert("customer_city".into(), string_or_null(&self.customer_city));
        row.insert("timestamp".into(), string_or_null(&self.timestamp));
        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }
        row
    }
}

/// One product catalog entry, keyed by `objectID`. Immutable once the
/// deduplicator has kept its first occurrence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub product_weight_g: Option<f64>,
    #[serde(flatten)]
    pub extra: Row,
}

impl ProductRecord {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("objectID".into(), Value::String(self.object_id.clone()));
        row.insert("name".into(), string_or_null(&self.name));
        row.insert("categories".into(), string_or_null(&self.categories));
        row.insert(
            "rating".into(),
            self.rating.map(number).unwrap_or(Value::Null),
        );
        row.insert(
            "product_weight_g".into(),
            self.product_weight_g.map(number).unwrap_or(Value::Null),
        );
        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }
        row
    }
}

fn take(row: &mut Row, key: &str) -> Option<String> {
    match row.shift_remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::String(_)) | Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn string_or_null(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|s| Value::String(s.clone()))
        .unwrap_or(Value::Null)
}

fn number(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
