//! Import path that bypasses curation.
//!
//! Used when the caller opts out of the curation engine: every record is
//! kept, titles get a light clean-up, prices use a flat markup, and the best
//! sellers are featured.

use tracing::{debug, info};

use crate::unicorn::furniture::config::CurationConfig;
use crate::unicorn::furniture::curate::fields;
use crate::unicorn::furniture::curate::images;
use crate::unicorn::furniture::curate::naming::title_case;
use crate::unicorn::furniture::curate::pricing::{round_one_decimal, round_to};
use crate::unicorn::furniture::model::{Badge, CuratedProduct, InputSource, RawProduct};
use crate::unicorn::furniture::source::category::UNKNOWN_CATEGORY;

const FLAT_MARKUP: f64 = 2.5;
const TITLE_NOISE: &[&str] = &[
    "Free Shipping",
    "Hot Sale",
    "New Arrival",
    "2024",
    "2025",
    "2026",
];
const MAX_TITLE_CHARS: usize = 60;
const TRUNCATED_TITLE_CHARS: usize = 57;
/// A listed original price counts as a discount only above this ratio.
const DISCOUNT_RATIO: f64 = 1.1;
/// API listings at or below this display price are dropped on import.
pub const MIN_API_PRICE_AED: u32 = 100;

/// Converts raw products without scoring or renaming them. API listings
/// priced at or below [`MIN_API_PRICE_AED`] are dropped.
pub fn passthrough(
    raw_products: &[RawProduct],
    source: InputSource,
    config: &CurationConfig,
) -> Vec<CuratedProduct> {
    let mut products: Vec<CuratedProduct> = raw_products
        .iter()
        .enumerate()
        .map(|(index, product)| convert(index, product, config))
        .filter(|product| source != InputSource::Api || product.price_aed > MIN_API_PRICE_AED)
        .collect();
    if products.len() < raw_products.len() {
        debug!(
            dropped = raw_products.len() - products.len(),
            "cheap API listings dropped"
        );
    }

    let mut by_demand: Vec<usize> = (0..products.len()).collect();
    by_demand.sort_by(|lhs, rhs| products[*rhs].source_orders.cmp(&products[*lhs].source_orders));
    for index in by_demand.into_iter().take(config.fallback_featured) {
        products[index].featured = true;
    }

    info!(count = products.len(), "products imported without curation");
    products
}

fn convert(index: usize, product: &RawProduct, config: &CurationConfig) -> CuratedProduct {
    let raw_name = product.text_or_empty("name");
    let cost_usd = fields::cost_usd(product, config.usd_to_aed);
    let cost_aed = cost_usd * config.usd_to_aed;
    let orders = product.count("ae_orders");

    let price_aed = if cost_usd > 0.0 {
        flat_price(cost_usd, config.usd_to_aed)
    } else {
        product.count("price_aed").min(u64::from(u32::MAX)) as u32
    };

    let old_price_aed = product
        .number("original_cost_usd")
        .filter(|original| cost_usd > 0.0 && *original > cost_usd * DISCOUNT_RATIO)
        .map(|original| flat_price(original, config.usd_to_aed))
        .filter(|old| *old > price_aed);

    let badge = if orders > 100 {
        Badge::BestSeller
    } else if old_price_aed.is_some() {
        Badge::Sale
    } else {
        Badge::New
    };

    let margin_pct = if price_aed > 0 && cost_aed > 0.0 {
        round_one_decimal((1.0 - cost_aed / f64::from(price_aed)) * 100.0)
    } else {
        0.0
    };

    CuratedProduct {
        product_id: product
            .text("product_id")
            .unwrap_or_else(|| format!("UF-{:03}", index + 1)),
        name: clean_title(&raw_name),
        raw_name,
        category: product
            .text("category")
            .map(|category| category.to_lowercase())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        description: product.text_or_empty("description"),
        price_aed,
        old_price_aed,
        badge,
        featured: false,
        active: true,
        colors: product.text_list("colors"),
        sizes: product.text_list("sizes"),
        images: images::curate(&fields::image_urls(product)),
        cost_usd: (cost_usd * 100.0).round_ties_even() / 100.0,
        cost_aed: cost_aed.round_ties_even() as u32,
        margin_pct,
        delivery_days: match product.count("delivery_days") {
            0 => config.default_delivery_days,
            days => days.min(u64::from(u32::MAX)) as u32,
        },
        source_url: product.text_or_empty("ae_url"),
        source_orders: orders,
        source_rating: product.text_or_empty("ae_rating"),
        quality_score: 0,
    }
}

/// Flat markup rounded to a price ending in 9. Tiny costs clamp at zero.
fn flat_price(cost_usd: f64, usd_to_aed: f64) -> u32 {
    (round_to(cost_usd * usd_to_aed * FLAT_MARKUP, 10.0) - 1.0).max(0.0) as u32
}

/// Removes listing noise, capitalises each word, and caps the length.
pub fn clean_title(title: &str) -> String {
    let mut cleaned = title.to_string();
    for noise in TITLE_NOISE {
        cleaned = cleaned.replace(noise, "");
    }
    let cleaned = title_case(&cleaned);
    if cleaned.chars().count() > MAX_TITLE_CHARS {
        let head: String = cleaned.chars().take(TRUNCATED_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        cleaned
    }
}
