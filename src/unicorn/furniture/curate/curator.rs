use std::fmt;

use tracing::{debug, info, warn};

use crate::unicorn::furniture::config::CurationConfig;
use crate::unicorn::furniture::curate::badge;
use crate::unicorn::furniture::curate::description;
use crate::unicorn::furniture::curate::fields;
use crate::unicorn::furniture::curate::images;
use crate::unicorn::furniture::curate::naming::NameTransformer;
use crate::unicorn::furniture::curate::pricing::{self, PricePositioner};
use crate::unicorn::furniture::curate::quality::QualityGate;
use crate::unicorn::furniture::model::{CuratedProduct, Pricing, RawProduct};
use crate::unicorn::furniture::source::category::UNKNOWN_CATEGORY;

/// Price and reference price used when neither cost nor a listed price is
/// known.
const BLIND_PRICE: Pricing = Pricing {
    price_aed: 999,
    old_price_aed: Some(1299),
    margin_pct: 0.0,
};

/// Reference-price inflation applied to a listed price when cost is unknown.
const LISTED_PRICE_INFLATION: f64 = 1.28;

/// Characters of the raw name kept in a rejection line.
const REJECT_NAME_WIDTH: usize = 45;

/// Batch statistics of one curation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurationReport {
    pub input: usize,
    pub passed: usize,
    pub rejected: usize,
    pub avg_score: f64,
    pub avg_margin: f64,
    /// One line per rejected record, in input order.
    pub reject_log: Vec<String>,
}

impl CurationReport {
    /// Share of the input that passed, as a whole percentage.
    pub fn pass_rate(&self) -> u32 {
        let input = self.input.max(1) as f64;
        (self.passed as f64 / input * 100.0).round_ties_even() as u32
    }
}

impl fmt::Display for CurationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "  UNICORN PREMIUM CURATION REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  Raw input:      {} products", self.input)?;
        writeln!(
            f,
            "  Passed filter:  {} products ({}%)",
            self.passed,
            self.pass_rate()
        )?;
        writeln!(f, "  Rejected:       {} products", self.rejected)?;
        writeln!(f, "  Avg quality:    {}/100", self.avg_score)?;
        writeln!(f, "  Avg margin:     {}%", self.avg_margin)?;
        if !self.reject_log.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Rejections:")?;
            for line in &self.reject_log {
                writeln!(f, "    {line}")?;
            }
        }
        write!(f, "{rule}")
    }
}

/// Curated products of one run, best score first, with the run report.
#[derive(Debug, Clone, PartialEq)]
pub struct Curation {
    pub products: Vec<CuratedProduct>,
    pub report: CurationReport,
}

/// Runs the full curation pipeline over batches of raw products.
#[derive(Debug, Clone, Default)]
pub struct Curator {
    config: CurationConfig,
}

impl Curator {
    pub fn new(config: CurationConfig) -> Self {
        Self { config }
    }

    /// Curates one batch from scratch.
    ///
    /// Records are processed in input order; rejected ones only leave a
    /// line in the report. The result is sorted by quality score (ties keep
    /// input order) and at least `featured_floor` products, or all of them
    /// if fewer exist, are featured.
    pub fn curate(&self, raw_products: &[RawProduct]) -> Curation {
        let gate = QualityGate::new(&self.config);
        let positioner = PricePositioner::new(&self.config);
        let mut names = NameTransformer::new();

        let mut report = CurationReport {
            input: raw_products.len(),
            ..CurationReport::default()
        };
        let mut curated: Vec<CuratedProduct> = Vec::new();
        let mut score_total = 0.0;
        let mut margin_total = 0.0;

        for product in raw_products {
            let verdict = gate.evaluate(product);
            let raw_name = product.text_or_empty("name");
            if !verdict.passes {
                let reason = verdict
                    .reasons
                    .first()
                    .map(String::as_str)
                    .unwrap_or("low score");
                debug!(name = %raw_name, %reason, "product rejected");
                report.rejected += 1;
                report
                    .reject_log
                    .push(format!("{raw_name:.width$} -> {reason}", width = REJECT_NAME_WIDTH));
                continue;
            }

            let category = product
                .text("category")
                .map(|category| category.to_lowercase())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
            let cost_usd = fields::cost_usd(product, self.config.usd_to_aed);
            let candidate_images = fields::image_urls(product);
            let orders = product.count("ae_orders");

            let name = names.transform(&raw_name, &category);
            let pricing = match positioner.calculate(cost_usd, &raw_name) {
                pricing if pricing.is_unknown_cost() => {
                    let fallback = listed_price_fallback(product);
                    if fallback == BLIND_PRICE {
                        warn!(name = %raw_name, "no cost or listed price, using blind price");
                    }
                    fallback
                }
                pricing => pricing,
            };
            let description = description::generate(&name, &raw_name, &category);
            let badge = badge::assign(cost_usd, verdict.score, orders);

            score_total += f64::from(verdict.score);
            margin_total += pricing.margin_pct;

            let product_id = product
                .text("product_id")
                .unwrap_or_else(|| format!("UF-{:03}", curated.len() + 1));

            debug!(
                %product_id,
                %name,
                score = verdict.score,
                price = pricing.price_aed,
                "product curated"
            );

            curated.push(CuratedProduct {
                product_id,
                name,
                raw_name,
                category,
                description,
                price_aed: pricing.price_aed,
                old_price_aed: pricing.old_price_aed,
                badge,
                featured: badge::is_featured(verdict.score, badge),
                active: true,
                colors: product.text_list("colors"),
                sizes: product.text_list("sizes"),
                images: images::curate(&candidate_images),
                cost_usd: (cost_usd * 100.0).round_ties_even() / 100.0,
                cost_aed: (cost_usd * self.config.usd_to_aed).round_ties_even() as u32,
                margin_pct: pricing.margin_pct,
                delivery_days: delivery_days(product, self.config.default_delivery_days),
                source_url: product.text_or_empty("ae_url"),
                source_orders: orders,
                source_rating: product.text_or_empty("ae_rating"),
                quality_score: verdict.score,
            });
        }

        curated.sort_by(|lhs, rhs| rhs.quality_score.cmp(&lhs.quality_score));
        ensure_featured(&mut curated, self.config.featured_floor);

        report.passed = curated.len();
        if !curated.is_empty() {
            let passed = curated.len() as f64;
            report.avg_score = pricing::round_one_decimal(score_total / passed);
            report.avg_margin = pricing::round_one_decimal(margin_total / passed);
        }

        info!(
            input = report.input,
            passed = report.passed,
            rejected = report.rejected,
            names_issued = names.issued(),
            "curation run complete"
        );

        Curation {
            products: curated,
            report,
        }
    }
}

/// Marks the leading products as featured when fewer than `floor` are.
/// Expects the slice sorted best first.
pub fn ensure_featured(products: &mut [CuratedProduct], floor: usize) {
    let featured = products.iter().filter(|product| product.featured).count();
    if featured < floor {
        for product in products.iter_mut().take(floor) {
            product.featured = true;
        }
    }
}

/// Pricing for products of unknown cost: keep a listed display price when
/// there is one, otherwise fall back to [`BLIND_PRICE`].
fn listed_price_fallback(product: &RawProduct) -> Pricing {
    let listed = product.count("price_aed");
    if listed == 0 {
        return BLIND_PRICE;
    }
    let listed = listed.min(u64::from(u32::MAX)) as u32;
    let reference = pricing::round_to(f64::from(listed) * LISTED_PRICE_INFLATION, 100.0) - 1.0;
    Pricing {
        price_aed: listed,
        old_price_aed: (reference > f64::from(listed)).then_some(reference as u32),
        margin_pct: 0.0,
    }
}

fn delivery_days(product: &RawProduct, default_days: u32) -> u32 {
    match product.count("delivery_days") {
        0 => default_days,
        days => days.min(u64::from(u32::MAX)) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicorn::furniture::model::Badge;
    use serde_json::{Value, json};

    fn record(value: Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    fn images(prefix: &str, count: usize) -> Vec<String> {
        (1..=count)
            .map(|i| format!("https://ae01.alicdn.com/kf/S{prefix}{i:03}.jpg"))
            .collect()
    }

    fn velvet_bed() -> RawProduct {
        record(json!({
            "name": "Hot Sale 2025 Modern Luxury Velvet Platform Bed King Size Hydraulic Storage For Bedroom Furniture Free Shipping",
            "category": "beds",
            "cost_usd": 180,
            "images": images("bed", 3),
            "ae_orders": 250,
            "ae_rating": "96"
        }))
    }

    #[test]
    fn velvet_bed_scenario() {
        let curation = Curator::default().curate(&[velvet_bed()]);
        let product = &curation.products[0];
        assert_eq!(product.name, "Milano Velvet Platform Bed");
        assert_eq!(product.quality_score, 85);
        assert_eq!(product.badge, Badge::BestSeller);
        assert_eq!(product.price_aed, 1699);
        assert_eq!(product.old_price_aed, Some(2199));
        assert_eq!(product.cost_aed, 661);
        assert_eq!(product.cost_usd, 180.0);
        assert_eq!(product.images.len(), 3);
        assert_eq!(product.product_id, "UF-001");
        assert_eq!(product.delivery_days, 21);
        assert!(product.featured);
        assert!(product.active);
    }

    #[test]
    fn rejections_are_logged_not_raised() {
        let dog_bed = record(json!({
            "name": "Pet Dog Bed Comfortable Large Size Waterproof",
            "category": "beds",
            "cost_usd": 20,
            "images": images("dog", 1),
            "ae_orders": 500
        }));
        let curation = Curator::default().curate(&[dog_bed, velvet_bed()]);
        assert_eq!(curation.report.input, 2);
        assert_eq!(curation.report.passed, 1);
        assert_eq!(curation.report.rejected, 1);
        assert_eq!(
            curation.report.reject_log,
            vec!["Pet Dog Bed Comfortable Large Size Waterproof -> Rejected: 'dog bed'"]
        );
        assert_eq!(curation.report.pass_rate(), 50);
    }

    #[test]
    fn reject_line_truncates_long_names() {
        let noisy = record(json!({
            "name": "Cheap Plastic Folding Chair Student Desk Office Stackable Set Of Four",
            "category": "chairs"
        }));
        let curation = Curator::default().curate(&[noisy]);
        assert_eq!(
            curation.report.reject_log[0],
            "Cheap Plastic Folding Chair Student Desk Offi -> Rejected: 'cheap'"
        );
    }

    #[test]
    fn unknown_cost_uses_listed_price() {
        let listed = record(json!({
            "name": "Walnut Sideboard",
            "category": "dining",
            "price_aed": "2450",
            "images": images("side", 2)
        }));
        let blind = record(json!({
            "name": "Walnut Cabinet",
            "category": "dining",
            "images": images("cab", 2)
        }));
        let curation = Curator::default().curate(&[listed, blind]);
        let by_raw = |raw: &str| {
            curation
                .products
                .iter()
                .find(|product| product.raw_name == raw)
                .unwrap()
        };
        assert_eq!(by_raw("Walnut Sideboard").price_aed, 2450);
        assert_eq!(by_raw("Walnut Sideboard").old_price_aed, Some(3099));
        assert_eq!(by_raw("Walnut Cabinet").price_aed, 999);
        assert_eq!(by_raw("Walnut Cabinet").old_price_aed, Some(1299));
        assert_eq!(by_raw("Walnut Cabinet").margin_pct, 0.0);
    }

    #[test]
    fn listed_price_reference_dropped_when_not_higher() {
        let pricing = listed_price_fallback(&record(json!({ "price_aed": 100 })));
        assert_eq!(pricing.price_aed, 100);
        assert_eq!(pricing.old_price_aed, None);
    }

    #[test]
    fn output_is_sorted_by_score_with_stable_ties() {
        let plain = |name: &str| {
            record(json!({
                "name": name,
                "category": "tables",
                "cost_usd": 90,
                "images": images(name, 2)
            }))
        };
        let curation = Curator::default().curate(&[
            plain("First Table"),
            plain("Velvet Table"),
            plain("Second Table"),
        ]);
        let raw_names: Vec<&str> = curation
            .products
            .iter()
            .map(|product| product.raw_name.as_str())
            .collect();
        assert_eq!(raw_names, vec!["Velvet Table", "First Table", "Second Table"]);
    }

    #[test]
    fn featured_backfill_cannot_exceed_batch() {
        let mut batch = Vec::new();
        for i in 0..9 {
            batch.push(record(json!({
                "name": format!("Dog Bed {i}"),
                "category": "beds",
                "images": images("x", 1)
            })));
        }
        for i in 0..3 {
            batch.push(record(json!({
                "name": format!("Storage Cabinet {i}"),
                "category": "wardrobes",
                "cost_usd": 120,
                "images": images("cab", 1)
            })));
        }
        let curation = Curator::default().curate(&batch);
        assert_eq!(curation.report.passed, 3);
        assert!(curation.products.iter().all(|product| product.quality_score < 65));
        assert!(curation.products.iter().all(|product| product.badge == Badge::New));
        assert_eq!(curation.products.iter().filter(|product| product.featured).count(), 3);
    }

    #[test]
    fn featured_backfill_marks_top_six() {
        let batch: Vec<RawProduct> = (0..8)
            .map(|i| {
                record(json!({
                    "name": format!("Storage Cabinet {i}"),
                    "category": "wardrobes",
                    "cost_usd": 120,
                    "images": images("cab", 2)
                }))
            })
            .collect();
        let curation = Curator::default().curate(&batch);
        let featured: Vec<bool> = curation
            .products
            .iter()
            .map(|product| product.featured)
            .collect();
        assert_eq!(featured, vec![true, true, true, true, true, true, false, false]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let batch = vec![velvet_bed(), velvet_bed(), velvet_bed()];
        let curator = Curator::default();
        let first = curator.curate(&batch);
        let second = curator.curate(&batch);
        assert_eq!(first, second);
        let names: Vec<&str> = first.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Milano Velvet Platform Bed",
                "Aurora Velvet Platform Bed",
                "Torino Velvet Platform Bed"
            ]
        );
    }

    #[test]
    fn report_renders_counts_and_rejections() {
        let curation =
            Curator::default().curate(&[velvet_bed(), record(json!({ "name": "Bean Bag" }))]);
        let text = curation.report.to_string();
        assert!(text.contains("Raw input:      2 products"));
        assert!(text.contains("Passed filter:  1 products (50%)"));
        assert!(text.contains("Bean Bag -> Rejected: 'bean bag'"));
    }
}
