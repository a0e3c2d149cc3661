//! Cost and image extraction over [`RawProduct`] records of any origin.

use crate::unicorn::furniture::model::RawProduct;

/// Cost keys in priority order. A key naming the display currency holds a
/// display-currency amount and is converted back to reference currency.
const COST_KEYS: [&str; 3] = ["cost_usd", "cost_aed", "cost"];
const DISPLAY_CURRENCY_MARKER: &str = "aed";

/// Number of numbered `image_url_N` slots a record may carry.
const IMAGE_SLOTS: usize = 4;

/// Resolves the product cost in reference currency.
///
/// The first key holding a positive number wins. Malformed values are
/// skipped, and `0.0` means the cost is unknown.
pub fn cost_usd(product: &RawProduct, usd_to_aed: f64) -> f64 {
    COST_KEYS
        .iter()
        .find_map(|key| {
            let value = product.number(key).filter(|value| *value > 0.0)?;
            Some(if key.contains(DISPLAY_CURRENCY_MARKER) {
                value / usd_to_aed
            } else {
                value
            })
        })
        .unwrap_or(0.0)
}

/// Collects candidate image URLs in discovery order: the `images` list,
/// then `image_url_1..=4`, then `image_url` when nothing else was found.
pub fn image_urls(product: &RawProduct) -> Vec<String> {
    let mut images: Vec<String> = product
        .array("images")
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .filter(|url| is_absolute_url(url))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    for slot in 1..=IMAGE_SLOTS {
        if let Some(url) = product.text(&format!("image_url_{slot}")) {
            if is_absolute_url(&url) && !images.contains(&url) {
                images.push(url);
            }
        }
    }

    if images.is_empty() {
        if let Some(url) = product.text("image_url").filter(|url| is_absolute_url(url)) {
            images.push(url);
        }
    }

    images
}

fn is_absolute_url(candidate: &str) -> bool {
    candidate.starts_with("http")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RATE: f64 = 3.67;

    fn record(value: serde_json::Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reference_cost_wins_over_display_cost() {
        let raw = record(json!({ "cost_usd": 180, "cost_aed": 3670 }));
        assert_eq!(cost_usd(&raw, RATE), 180.0);
    }

    #[test]
    fn display_cost_is_converted() {
        let raw = record(json!({ "cost_aed": "367" }));
        assert!((cost_usd(&raw, RATE) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_and_zero_costs_fall_through() {
        let raw = record(json!({ "cost_usd": "about forty", "cost_aed": 0, "cost": "55" }));
        assert_eq!(cost_usd(&raw, RATE), 55.0);
    }

    #[test]
    fn missing_cost_is_zero() {
        let raw = record(json!({ "name": "Sofa" }));
        assert_eq!(cost_usd(&raw, RATE), 0.0);
    }

    #[test]
    fn images_merge_list_and_numbered_slots_without_duplicates() {
        let raw = record(json!({
            "images": ["https://cdn/a.jpg", "ftp://cdn/x.jpg", 7, "https://cdn/b.jpg"],
            "image_url_1": "https://cdn/a.jpg",
            "image_url_2": "https://cdn/c.jpg",
            "image_url": "https://cdn/fallback.jpg"
        }));
        assert_eq!(
            image_urls(&raw),
            vec!["https://cdn/a.jpg", "https://cdn/b.jpg", "https://cdn/c.jpg"]
        );
    }

    #[test]
    fn single_image_field_is_a_fallback() {
        let raw = record(json!({ "image_url": "https://cdn/only.jpg" }));
        assert_eq!(image_urls(&raw), vec!["https://cdn/only.jpg"]);
        assert!(image_urls(&record(json!({ "image_url": "only.jpg" }))).is_empty());
    }
}
