//! Product objects returned by the affiliate product-search API.

use serde::Deserialize;
use serde_json::Value;

use crate::unicorn::furniture::error::{CurationError, Result};
use crate::unicorn::furniture::model::RawProduct;
use crate::unicorn::furniture::source::ProductSource;
use crate::unicorn::furniture::source::category::guess_category;

/// Shipping lead time for products fulfilled by the overseas supplier.
pub const SUPPLIER_DELIVERY_DAYS: u32 = 21;

/// Extra gallery images kept next to the main image.
const MAX_EXTRA_IMAGES: usize = 3;

/// Path of the product array inside the query response envelope.
const ENVELOPE_PATH: [&str; 5] = [
    "aliexpress_affiliate_product_query_response",
    "resp_result",
    "result",
    "products",
    "product",
];

/// One product of a search response. Prices and counters arrive as strings
/// or numbers depending on the endpoint, so they stay loosely typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiProduct {
    pub product_id: Value,
    pub product_title: String,
    pub target_sale_price: Value,
    pub target_original_price: Value,
    pub product_main_image_url: String,
    pub product_small_image_urls: Value,
    pub lastest_volume: Value,
    pub evaluate_rate: Value,
    pub promotion_link: String,
    pub product_detail_url: String,
    /// Target category, set by the caller before conversion.
    #[serde(skip)]
    pub category: Option<String>,
}

impl ApiProduct {
    /// Sets the category the product is imported into.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_string);
        self
    }

    /// Main image first, then up to three distinct gallery images.
    fn images(&self) -> Vec<String> {
        let gallery = match &self.product_small_image_urls {
            Value::Array(items) => items.as_slice(),
            Value::Object(wrapper) => wrapper
                .get("string")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        let mut images = Vec::new();
        if !self.product_main_image_url.trim().is_empty() {
            images.push(self.product_main_image_url.trim().to_string());
        }
        for url in gallery
            .iter()
            .filter_map(Value::as_str)
            .take(MAX_EXTRA_IMAGES)
        {
            if !url.is_empty() && !images.iter().any(|known| known == url) {
                images.push(url.to_string());
            }
        }
        images
    }

    fn link(&self) -> &str {
        if self.product_detail_url.is_empty() {
            &self.promotion_link
        } else {
            &self.product_detail_url
        }
    }
}

impl ProductSource for ApiProduct {
    fn into_raw(self, _index: usize) -> RawProduct {
        let category = self
            .category
            .clone()
            .unwrap_or_else(|| guess_category(&self.product_title).to_string());
        let mut raw = RawProduct::new()
            .with("product_id", format!("AE-{}", scalar_text(&self.product_id)))
            .with("name", self.product_title.trim())
            .with("category", category)
            .with("images", self.images())
            .with("ae_url", self.link())
            .with("ae_orders", self.lastest_volume.clone())
            .with("ae_rating", scalar_text(&self.evaluate_rate))
            .with("delivery_days", SUPPLIER_DELIVERY_DAYS);
        if let Some(cost) = scalar_number(&self.target_sale_price) {
            raw.insert("cost_usd", cost);
        }
        if let Some(original) = scalar_number(&self.target_original_price) {
            raw.insert("original_cost_usd", original);
        }
        raw
    }
}

/// Extracts the product list from a search response.
///
/// Accepts the full response envelope or a bare array of products. Each
/// product gets `category` when given, otherwise a guess from its title.
pub fn parse_response(document: Value, category: Option<&str>) -> Result<Vec<ApiProduct>> {
    let products = match document {
        Value::Array(items) => items,
        Value::Object(_) => {
            let mut cursor = &document;
            for key in ENVELOPE_PATH {
                cursor = cursor.get(key).ok_or_else(|| {
                    CurationError::UnsupportedInput(format!(
                        "API response is missing `{key}`"
                    ))
                })?;
            }
            cursor.as_array().cloned().ok_or_else(|| {
                CurationError::UnsupportedInput("API product list is not an array".to_string())
            })?
        }
        _ => {
            return Err(CurationError::UnsupportedInput(
                "API input must be a response object or an array of products".to_string(),
            ));
        }
    };

    products
        .into_iter()
        .map(|product| {
            let product: ApiProduct = serde_json::from_value(product)?;
            Ok(product.with_category(category))
        })
        .collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    (number > 0.0).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "product_id": 1005006,
            "product_title": "Velvet Upholstered Platform Bed",
            "target_sale_price": "180.50",
            "target_original_price": "260",
            "product_main_image_url": "https://ae01.alicdn.com/main.jpg",
            "product_small_image_urls": { "string": [
                "https://ae01.alicdn.com/main.jpg",
                "https://ae01.alicdn.com/a.jpg",
                "https://ae01.alicdn.com/b.jpg",
                "https://ae01.alicdn.com/c.jpg"
            ]},
            "lastest_volume": 320,
            "evaluate_rate": "96.5%",
            "promotion_link": "https://s.click.example/abc"
        })
    }

    #[test]
    fn converts_product_to_canonical_fields() {
        let products = parse_response(json!([sample()]), None).unwrap();
        let raw = products.into_iter().next().unwrap().into_raw(0);

        assert_eq!(raw.text("product_id").as_deref(), Some("AE-1005006"));
        assert_eq!(raw.text("category").as_deref(), Some("beds"));
        assert_eq!(raw.number("cost_usd"), Some(180.5));
        assert_eq!(raw.number("original_cost_usd"), Some(260.0));
        assert_eq!(raw.count("ae_orders"), 320);
        assert_eq!(raw.text("ae_rating").as_deref(), Some("96.5%"));
        assert_eq!(raw.text("ae_url").as_deref(), Some("https://s.click.example/abc"));
        assert_eq!(raw.count("delivery_days"), 21);
        // main image plus the first three gallery entries, minus the duplicate
        assert_eq!(raw.text_list("images").len(), 3);
    }

    #[test]
    fn unwraps_response_envelope() {
        let envelope = json!({
            "aliexpress_affiliate_product_query_response": {
                "resp_result": { "result": { "products": { "product": [sample()] } } }
            }
        });
        let products = parse_response(envelope, Some("sofas")).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].clone().into_raw(0).text("category").as_deref(), Some("sofas"));
    }

    #[test]
    fn gallery_may_be_a_plain_list() {
        let mut product = sample();
        product["product_small_image_urls"] = json!(["https://ae01.alicdn.com/x.jpg"]);
        let product: ApiProduct = serde_json::from_value(product).unwrap();
        assert_eq!(product.images().len(), 2);
    }

    #[test]
    fn rejects_unknown_envelope() {
        let error = parse_response(json!({ "data": [] }), None).unwrap_err();
        assert!(matches!(error, CurationError::UnsupportedInput(_)));
    }
}
