pub mod coerce;
pub mod errors;
pub mod model;
pub mod orders;
pub mod products;
mod walk;

pub use coerce::{normalize_timestamp, parse_decimal, parse_order_timestamp, Coerced};
pub use errors::ReaderError;
pub use model::{OrderRecord, Payment, ProductRecord, Row};
pub use orders::{parse_order_file, read_orders};
pub use products::{parse_product_file, read_products};

#[cfg(test)]
mod tests;
