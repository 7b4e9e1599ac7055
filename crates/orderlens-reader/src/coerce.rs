use chrono::NaiveDateTime;

/// Timestamp layout used by the raw order files.
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";
/// Canonical layout written to every output artifact.
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a lenient parse: either the typed value, or the original raw
/// text plus the reason it did not parse. Callers decide whether the raw
/// form is kept verbatim or demoted to missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    Parsed(T),
    Unparsed { raw: String, reason: String },
}

impl<T> Coerced<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            Coerced::Parsed(value) => Some(value),
            Coerced::Unparsed { .. } => None,
        }
    }
}

pub fn parse_decimal(raw: &str) -> Coerced<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Coerced::Parsed(value),
        Err(err) => Coerced::Unparsed {
            raw: raw.to_string(),
            reason: err.to_string(),
        },
    }
}

pub fn parse_order_timestamp(raw: &str) -> Coerced<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(raw.trim(), SOURCE_TIMESTAMP_FORMAT) {
        Ok(dt) => Coerced::Parsed(dt),
        Err(err) => Coerced::Unparsed {
            raw: raw.to_string(),
            reason: err.to_string(),
        },
    }
}

/// Reformats an order timestamp to the canonical layout, handing back the
/// original string untouched when it does not match the source format.
pub fn normalize_timestamp(raw: &str) -> String {
    match parse_order_timestamp(raw) {
        Coerced::Parsed(dt) => dt.format(CANONICAL_TIMESTAMP_FORMAT).to_string(),
        Coerced::Unparsed { raw, .. } => raw,
    }
}
