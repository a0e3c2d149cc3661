//! Acceptance scoring for raw products.

use crate::unicorn::furniture::config::CurationConfig;
use crate::unicorn::furniture::curate::fields;
use crate::unicorn::furniture::model::{RawProduct, Verdict};

/// Phrases that mark a listing as unsellable in a premium catalogue.
pub const REJECT_KEYWORDS: &[&str] = &[
    "cheap",
    "budget",
    "economy",
    "wholesale lot",
    "clearance",
    "inflatable",
    "blow up",
    "bean bag",
    "kids cartoon",
    "student dorm",
    "disposable",
    "pet bed",
    "dog bed",
    "cat bed",
    "cat tree",
    "outdoor camping",
    "camping chair",
    "beach chair",
    "car seat",
    "massage chair",
    "gaming chair",
    "nail table",
    "salon",
    "barber",
    "tattoo",
    "3d print",
    "cardboard furniture",
];

/// Material keywords that earn score. Every distinct hit counts.
pub const PREMIUM_MATERIALS: &[&str] = &[
    "velvet",
    "bouclé",
    "boucle",
    "linen",
    "leather",
    "genuine leather",
    "marble",
    "sintered stone",
    "sintered",
    "slate",
    "travertine",
    "granite",
    "solid wood",
    "oak",
    "walnut",
    "teak",
    "ash wood",
    "beech",
    "acacia",
    "brass",
    "gold",
    "chrome",
    "stainless steel",
    "brushed metal",
    "ceramic",
    "porcelain",
    "crystal",
    "glass",
    "tempered glass",
    "memory foam",
    "latex",
    "down",
    "feather",
    "italian",
    "european",
    "scandinavian",
    "nordic",
];

const BASE_SCORE: i32 = 50;
const MATERIAL_POINTS: i32 = 7;
const MATERIAL_CAP: i32 = 28;

/// Scores raw products and decides whether they enter the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct QualityGate<'a> {
    config: &'a CurationConfig,
}

impl<'a> QualityGate<'a> {
    pub fn new(config: &'a CurationConfig) -> Self {
        Self { config }
    }

    /// Evaluates one product.
    ///
    /// Block-listed wording, a cost under the category floor, and a missing
    /// image are hard rejections with a score of `0`. Everything else is
    /// scored from a base of 50 and compared to the configured threshold.
    pub fn evaluate(&self, product: &RawProduct) -> Verdict {
        let name = product.text_or_empty("name").to_lowercase();
        let description = product.text_or_empty("description").to_lowercase();
        let corpus = format!("{name} {description}");
        let category = product.text_or_empty("category").to_lowercase();
        let cost_usd = fields::cost_usd(product, self.config.usd_to_aed);
        let images = fields::image_urls(product);
        let orders = product.count("ae_orders");

        if let Some(keyword) = REJECT_KEYWORDS.iter().find(|kw| corpus.contains(*kw)) {
            return Verdict::rejected(format!("Rejected: '{keyword}'"));
        }

        let min_cost = self.config.min_cost_for(&category);
        if cost_usd > 0.0 && cost_usd < min_cost {
            return Verdict::rejected(format!(
                "Too cheap: ${cost_usd:.0} < ${min_cost} min for {category}"
            ));
        }

        if images.is_empty() {
            return Verdict::rejected("No images");
        }

        let mut score = BASE_SCORE;
        let mut reasons = Vec::new();

        let material_hits = PREMIUM_MATERIALS
            .iter()
            .filter(|material| corpus.contains(*material))
            .count() as i32;
        if material_hits > 0 {
            score += (material_hits * MATERIAL_POINTS).min(MATERIAL_CAP);
            reasons.push(format!("{material_hits} premium material(s)"));
        }

        match images.len() {
            n if n >= 3 => score += 8,
            1 => score -= 3,
            _ => {}
        }

        if orders > 200 {
            score += 12;
            reasons.push(format!("High demand ({orders})"));
        } else if orders > 50 {
            score += 7;
            reasons.push(format!("Good demand ({orders})"));
        }

        if let Some(rating) = parse_rating(product) {
            if rating > 95.0 {
                score += 8;
            } else if rating > 90.0 {
                score += 4;
            } else if rating < 75.0 {
                score -= 8;
            }
        }

        let score = score.clamp(0, 100) as u8;
        let passes = score >= self.config.min_score;
        if !passes {
            reasons.insert(
                0,
                format!(
                    "Score {score}/100 below threshold {} (short by {})",
                    self.config.min_score,
                    self.config.min_score - score
                ),
            );
        }

        Verdict {
            passes,
            score,
            reasons,
        }
    }
}

/// Seller rating as a percentage; a trailing `%` is ignored.
fn parse_rating(product: &RawProduct) -> Option<f64> {
    product
        .text("ae_rating")?
        .replace('%', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}
