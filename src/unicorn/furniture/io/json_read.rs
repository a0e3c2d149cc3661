use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::unicorn::furniture::error::{CurationError, Result};
use crate::unicorn::furniture::model::{InputSource, RawProduct};
use crate::unicorn::furniture::source::{self, ManualEntry, api};

/// Loads a JSON product document of the given shape.
///
/// `category` applies to API payloads only; other shapes carry their own.
pub fn read_products(
    path: &Path,
    shape: InputSource,
    category: Option<&str>,
) -> Result<Vec<RawProduct>> {
    let data = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&data)?;

    let products = match shape {
        InputSource::Api => source::collect_raw(api::parse_response(document, category)?),
        InputSource::Manual => {
            let entries: Vec<ManualEntry> = serde_json::from_value(document)?;
            source::collect_raw(entries)
        }
        InputSource::Records => source::collect_raw(records(document)?),
        InputSource::Csv => {
            return Err(CurationError::UnsupportedInput(format!(
                "{} is read as JSON but the source is csv",
                path.display()
            )));
        }
    };

    debug!(count = products.len(), %shape, "read JSON products");
    Ok(products)
}

/// Accepts a bare array of records or an object holding one under
/// `products`.
fn records(document: Value) -> Result<Vec<Map<String, Value>>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove("products") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CurationError::UnsupportedInput(
                    "record document has no `products` array".to_string(),
                ));
            }
        },
        _ => {
            return Err(CurationError::UnsupportedInput(
                "record document must be an array of objects".to_string(),
            ));
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(CurationError::UnsupportedInput(format!(
                "expected a product object, found {other}"
            ))),
        })
        .collect()
}
