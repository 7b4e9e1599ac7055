use orderlens_reader::coerce::{parse_decimal, Coerced};
use orderlens_reader::{OrderRecord, Payment};

/// Known data-entry typo shipped by the upstream order system.
pub const MISSPELLED_DELIVERED: &str = "dereviled";
pub const DELIVERED: &str = "delivered";

/// Repairs the known anomalies on the filtered order set. Both corrections
/// are idempotent: applying them twice yields the same records as once.
pub fn normalize_orders(orders: &mut [OrderRecord]) {
    for order in orders.iter_mut() {
        fix_order_status(order);
        coerce_payment(order);
    }
}

/// Exact-match replacement only. Any other status value, including ones we
/// have never seen, passes through unchanged.
fn fix_order_status(order: &mut OrderRecord) {
    if order.order_status.as_deref() == Some(MISSPELLED_DELIVERED) {
        order.order_status = Some(DELIVERED.to_string());
    }
}

/// Coerces a raw payment string to its numeric value. Unparseable values
/// become missing rather than failing the run; already-numeric payments are
/// left alone.
fn coerce_payment(order: &mut OrderRecord) {
    order.payment = match order.payment.take() {
        Some(Payment::Raw(raw)) => match parse_decimal(&raw) {
            Coerced::Parsed(amount) => Some(Payment::Amount(amount)),
            Coerced::Unparsed { .. } => None,
        },
        other => other,
    };
}
