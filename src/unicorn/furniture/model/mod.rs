use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a product. Kept as the plain string that appears
/// in the spreadsheet so imports and exports agree on it.
pub type ProductId = String;

/// Shape of the document a batch of raw products was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Affiliate product-search API payload.
    Api,
    /// Row-per-product CSV file.
    Csv,
    /// Hand-entered products.
    Manual,
    /// Records already expressed with the canonical field names.
    Records,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Api => write!(f, "api"),
            InputSource::Csv => write!(f, "csv"),
            InputSource::Manual => write!(f, "manual"),
            InputSource::Records => write!(f, "records"),
        }
    }
}

/// A loosely typed product record as handed over by a source adapter.
///
/// Fields may be absent, hold the wrong JSON type, or carry numbers as
/// strings. Accessors never fail: values that cannot be interpreted read as
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct {
    fields: Map<String, Value>,
}

impl RawProduct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`RawProduct::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Reads a field as text. Numbers and booleans are rendered; blank
    /// strings, nulls, arrays and objects read as missing.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Reads a field as text, or an empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Reads a field as a float. Numeric strings are parsed after dropping
    /// thousands separators and a display-currency marker; anything else
    /// reads as missing.
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = match self.fields.get(key)? {
            Value::Number(number) => number.as_f64()?,
            Value::String(text) => text
                .replace(',', "")
                .replace("AED", "")
                .trim()
                .parse::<f64>()
                .ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Reads a non-negative whole count, truncating fractions. Missing or
    /// malformed values read as `0`.
    pub fn count(&self, key: &str) -> u64 {
        self.number(key)
            .filter(|value| *value > 0.0)
            .map(|value| value.trunc() as u64)
            .unwrap_or(0)
    }

    /// Reads a list of strings. A JSON array keeps its string members, a
    /// string is split on commas.
    pub fn text_list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(text)) => split_list(text),
            _ => Vec::new(),
        }
    }

    /// Raw array stored under `key`, if the field is an array.
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.fields.get(key)?.as_array()
    }
}

impl From<Map<String, Value>> for RawProduct {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Splits a comma-separated cell into trimmed, non-empty entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merchandising label attached to a curated product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Premium,
    Exclusive,
    #[serde(rename = "Best Seller")]
    BestSeller,
    New,
    Sale,
}

impl Badge {
    /// Label shown on the storefront.
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Premium => "Premium",
            Badge::Exclusive => "Exclusive",
            Badge::BestSeller => "Best Seller",
            Badge::New => "New",
            Badge::Sale => "Sale",
        }
    }

    /// Parses a storefront label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Premium" => Some(Badge::Premium),
            "Exclusive" => Some(Badge::Exclusive),
            "Best Seller" => Some(Badge::BestSeller),
            "New" => Some(Badge::New),
            "Sale" => Some(Badge::Sale),
            _ => None,
        }
    }

    /// Badges that qualify a product for the featured strip on their own.
    pub fn is_headline(&self) -> bool {
        matches!(self, Badge::Premium | Badge::Exclusive | Badge::BestSeller)
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Retail pricing derived from a product's cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// Retail price in display currency.
    pub price_aed: u32,
    /// Pre-discount reference price, strictly above `price_aed` when set.
    pub old_price_aed: Option<u32>,
    /// Margin over cost, in percent with one decimal.
    pub margin_pct: f64,
}

impl Pricing {
    /// Sentinel returned for products whose cost is unknown.
    pub const UNKNOWN_COST: Pricing = Pricing {
        price_aed: 0,
        old_price_aed: None,
        margin_pct: 0.0,
    };

    pub fn is_unknown_cost(&self) -> bool {
        self.price_aed == 0
    }
}

/// Outcome of the quality gate for one raw product.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passes: bool,
    /// Score in `0..=100`.
    pub score: u8,
    /// Human readable notes, rejection reason first.
    pub reasons: Vec<String>,
}

impl Verdict {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            passes: false,
            score: 0,
            reasons: vec![reason.into()],
        }
    }
}

/// A product repositioned for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedProduct {
    pub product_id: ProductId,
    /// Brand-styled display name, unique within one curation run.
    pub name: String,
    /// Title as received from the source.
    pub raw_name: String,
    /// Lowercased category slug.
    pub category: String,
    pub description: String,
    pub price_aed: u32,
    pub old_price_aed: Option<u32>,
    pub badge: Badge,
    pub featured: bool,
    pub active: bool,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    /// At most four full-size image URLs.
    pub images: Vec<String>,
    pub cost_usd: f64,
    pub cost_aed: u32,
    pub margin_pct: f64,
    pub delivery_days: u32,
    pub source_url: String,
    pub source_orders: u64,
    pub source_rating: String,
    pub quality_score: u8,
}
