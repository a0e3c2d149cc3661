//! Retail price positioning from supplier cost.

use crate::unicorn::furniture::config::CurationConfig;
use crate::unicorn::furniture::model::Pricing;

/// Lowest retail price the store lists, in display currency.
pub const PRICE_FLOOR_AED: f64 = 199.0;

/// Highest retail price the store lists. Keeps prices and their reference
/// prices representable as whole display-currency amounts.
pub const PRICE_CEILING_AED: f64 = 999_999_999.0;

/// Reference-price inflation for products costing under this amount.
const CHEAP_COST_USD: f64 = 200.0;
const CHEAP_INFLATION: f64 = 0.30;
const STANDARD_INFLATION: f64 = 0.25;

/// Turns reference-currency costs into display-currency retail prices.
#[derive(Debug, Clone, Copy)]
pub struct PricePositioner<'a> {
    config: &'a CurationConfig,
}

impl<'a> PricePositioner<'a> {
    pub fn new(config: &'a CurationConfig) -> Self {
        Self { config }
    }

    /// Prices a product. Returns [`Pricing::UNKNOWN_COST`] when `cost_usd`
    /// is not a positive finite amount.
    pub fn calculate(&self, cost_usd: f64, raw_name: &str) -> Pricing {
        if !(cost_usd > 0.0 && cost_usd.is_finite()) {
            return Pricing::UNKNOWN_COST;
        }

        let markup = self.markup_for(cost_usd, raw_name);
        let raw_price = cost_usd * self.config.usd_to_aed * markup;
        let price = psychological_price(raw_price.min(PRICE_CEILING_AED))
            .clamp(PRICE_FLOOR_AED, PRICE_CEILING_AED);

        let inflation = if cost_usd < CHEAP_COST_USD {
            CHEAP_INFLATION
        } else {
            STANDARD_INFLATION
        };
        let old_price = round_to(price * (1.0 + inflation), 100.0) - 1.0;

        let cost_aed = cost_usd * self.config.usd_to_aed;
        let margin_pct = round_one_decimal((1.0 - cost_aed / price) * 100.0);

        let price_aed = price as u32;
        let old_price_aed = old_price as u32;
        Pricing {
            price_aed,
            old_price_aed: (old_price_aed > price_aed).then_some(old_price_aed),
            margin_pct,
        }
    }

    /// Band multiplier, lifted once by the first material premium found in
    /// the raw name.
    pub fn markup_for(&self, cost_usd: f64, raw_name: &str) -> f64 {
        let markup = self
            .config
            .markup_tiers
            .iter()
            .find(|tier| tier.contains(cost_usd))
            .map(|tier| tier.multiplier)
            .unwrap_or(self.config.default_markup);

        let name = raw_name.to_lowercase();
        match self
            .config
            .material_premiums
            .iter()
            .find(|premium| name.contains(&premium.keyword))
        {
            Some(premium) => markup * premium.multiplier,
            None => markup,
        }
    }
}

/// Rounds to a price ending in 9: hundreds from 1000, fifties from 200,
/// tens below that.
pub fn psychological_price(raw_price: f64) -> f64 {
    if raw_price >= 1000.0 {
        round_to(raw_price, 100.0) - 1.0
    } else if raw_price >= 200.0 {
        round_to(raw_price, 50.0) - 1.0
    } else {
        round_to(raw_price, 10.0) - 1.0
    }
}

/// Rounds to the nearest multiple of `step`; exact halves go to the even
/// multiple.
pub fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round_ties_even() * step
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioner(config: &CurationConfig) -> PricePositioner<'_> {
        PricePositioner::new(config)
    }

    #[test]
    fn zero_cost_returns_sentinel() {
        let config = CurationConfig::default();
        let pricing = positioner(&config).calculate(0.0, "Velvet Bed");
        assert_eq!(pricing, Pricing::UNKNOWN_COST);
        assert!(pricing.is_unknown_cost());
        assert_eq!(positioner(&config).calculate(-5.0, ""), Pricing::UNKNOWN_COST);
    }

    #[test]
    fn velvet_bed_uses_mid_band_without_premium() {
        let config = CurationConfig::default();
        // 180 × 3.67 × 2.5 = 1651.5 → 1700 − 1
        let pricing = positioner(&config).calculate(180.0, "Modern Luxury Velvet Platform Bed");
        assert_eq!(pricing.price_aed, 1699);
        // 1699 × 1.3 = 2208.7 → 2200 − 1
        assert_eq!(pricing.old_price_aed, Some(2199));
        assert_eq!(pricing.margin_pct, 61.1);
    }

    #[test]
    fn material_premium_applies_once() {
        let config = CurationConfig::default();
        let plain = positioner(&config).markup_for(450.0, "Dining Table");
        let marble = positioner(&config).markup_for(450.0, "Italian Marble Dining Table");
        assert_eq!(plain, 2.2);
        assert!((marble - 2.2 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn small_prices_round_to_tens_and_hit_the_floor() {
        let config = CurationConfig::default();
        // 20 × 3.67 × 3.5 = 256.9 → 250 − 1
        assert_eq!(positioner(&config).calculate(20.0, "").price_aed, 249);
        // 10 × 3.67 × 3.5 = 128.45 → 129, floored to 199
        assert_eq!(positioner(&config).calculate(10.0, "").price_aed, 199);
    }

    #[test]
    fn cost_beyond_the_last_band_uses_default_markup() {
        let config = CurationConfig::default();
        assert_eq!(positioner(&config).markup_for(12_000.0, ""), 2.5);
    }

    #[test]
    fn price_is_monotonic_within_a_band() {
        let config = CurationConfig::default();
        let mut previous = 0;
        let mut cost = 150.0;
        while cost < 400.0 {
            let price = positioner(&config).calculate(cost, "Sofa").price_aed;
            assert!(price >= previous, "{cost} → {price} < {previous}");
            previous = price;
            cost += 0.5;
        }
    }

    #[test]
    fn reference_price_exceeds_price_and_ends_in_nine() {
        let config = CurationConfig::default();
        for cost in [16.0, 45.0, 60.0, 99.0, 150.0, 199.0, 200.0, 420.0, 780.0, 1200.0] {
            let pricing = positioner(&config).calculate(cost, "Walnut Console");
            let old = pricing.old_price_aed.expect("reference price");
            assert!(old > pricing.price_aed);
            assert_eq!(pricing.price_aed % 10, 9);
            assert_eq!(old % 100, 99);
        }
    }

    #[test]
    fn extreme_cost_is_capped_below_the_reference_price() {
        let config = CurationConfig::default();
        let pricing = positioner(&config).calculate(2.0e9, "Sofa");
        assert_eq!(pricing.price_aed, 999_999_999);
        let old = pricing.old_price_aed.expect("reference price");
        assert!(old > pricing.price_aed);
        assert_eq!(old % 100, 99);
        assert_eq!(
            positioner(&config).calculate(f64::INFINITY, "Sofa"),
            Pricing::UNKNOWN_COST
        );
    }

    #[test]
    fn rounding_prefers_even_on_ties() {
        assert_eq!(round_to(250.0, 100.0), 200.0);
        assert_eq!(round_to(350.0, 100.0), 400.0);
        assert_eq!(round_one_decimal(61.14), 61.1);
    }
}
