//! Adapters that turn each supported input shape into a [`RawProduct`].
//!
//! All duck-typed field access lives here; the curation engine only ever
//! sees canonical field names.

use serde_json::{Map, Value};

use crate::unicorn::furniture::model::RawProduct;

pub mod api;
pub mod category;
pub mod csv_row;
pub mod manual;

pub use api::ApiProduct;
pub use category::guess_category;
pub use csv_row::CsvRow;
pub use manual::ManualEntry;

/// Delivery lead time for hand-entered and spreadsheet products.
pub const LOCAL_DELIVERY_DAYS: u32 = 14;

/// A product record in one of the supported source shapes.
pub trait ProductSource {
    /// Converts the record. `index` is its zero-based position in the batch
    /// and is used to derive an identifier when the source has none.
    fn into_raw(self, index: usize) -> RawProduct;
}

/// Records already using the canonical field names pass through unchanged.
impl ProductSource for Map<String, Value> {
    fn into_raw(self, _index: usize) -> RawProduct {
        RawProduct::from(self)
    }
}

impl ProductSource for RawProduct {
    fn into_raw(self, _index: usize) -> RawProduct {
        self
    }
}

/// Converts a whole batch, preserving order.
pub fn collect_raw<S, I>(records: I) -> Vec<RawProduct>
where
    S: ProductSource,
    I: IntoIterator<Item = S>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_raw(index))
        .collect()
}
