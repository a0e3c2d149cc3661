use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::unicorn::furniture::error::{CurationError, Result};
use crate::unicorn::furniture::model::InputSource;

/// Acceptance threshold used when products were typed in by hand or
/// collected into a CSV sheet.
pub const MANUAL_ENTRY_MIN_SCORE: u8 = 35;

/// One `[low, high)` cost band of the markup table, in reference currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupTier {
    pub low: f64,
    pub high: f64,
    pub multiplier: f64,
}

impl MarkupTier {
    pub fn new(low: f64, high: f64, multiplier: f64) -> Self {
        Self {
            low,
            high,
            multiplier,
        }
    }

    /// Returns `true` when `cost` falls inside the band.
    pub fn contains(&self, cost: f64) -> bool {
        self.low <= cost && cost < self.high
    }
}

/// Keyword that lifts the markup when it appears in a raw product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPremium {
    pub keyword: String,
    pub multiplier: f64,
}

/// Tunables of the curation engine.
///
/// Every field has a default, so a configuration file only needs to name
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Minimum quality score a product needs to be accepted.
    pub min_score: u8,
    /// Reference (USD) to display (AED) conversion rate.
    pub usd_to_aed: f64,
    /// Minimum plausible cost per category slug, in reference currency.
    pub min_cost_usd: BTreeMap<String, f64>,
    /// Floor used for categories missing from `min_cost_usd`.
    pub default_min_cost_usd: f64,
    /// Ordered markup bands; the first matching band wins.
    pub markup_tiers: Vec<MarkupTier>,
    /// Markup applied when no band matches.
    pub default_markup: f64,
    /// Ordered material premiums; only the first hit applies.
    pub material_premiums: Vec<MaterialPremium>,
    /// Minimum number of featured products after a run.
    pub featured_floor: usize,
    /// Lead time used when the source does not carry one.
    pub default_delivery_days: u32,
    /// Number of best sellers featured when curation is skipped.
    pub fallback_featured: usize,
}

impl Default for CurationConfig {
    fn default() -> Self {
        let min_cost_usd = [
            ("beds", 60.0),
            ("sofas", 100.0),
            ("dining", 80.0),
            ("chairs", 25.0),
            ("tv", 40.0),
            ("wardrobes", 80.0),
            ("tables", 20.0),
            ("nightstands", 18.0),
            ("dressing", 35.0),
            ("mattress", 40.0),
            ("ottoman", 15.0),
            ("chaise", 60.0),
        ]
        .into_iter()
        .map(|(category, floor)| (category.to_string(), floor))
        .collect();

        let material_premiums = [
            ("marble", 1.15),
            ("sintered", 1.12),
            ("italian", 1.15),
            ("leather", 1.10),
            ("walnut", 1.10),
            ("teak", 1.12),
            ("brass", 1.08),
            ("oak", 1.06),
        ]
        .into_iter()
        .map(|(keyword, multiplier)| MaterialPremium {
            keyword: keyword.to_string(),
            multiplier,
        })
        .collect();

        Self {
            min_score: 40,
            usd_to_aed: 3.67,
            min_cost_usd,
            default_min_cost_usd: 15.0,
            markup_tiers: vec![
                MarkupTier::new(0.0, 50.0, 3.5),
                MarkupTier::new(50.0, 150.0, 3.0),
                MarkupTier::new(150.0, 400.0, 2.5),
                MarkupTier::new(400.0, 800.0, 2.2),
                MarkupTier::new(800.0, 9999.0, 2.0),
            ],
            default_markup: 2.5,
            material_premiums,
            featured_floor: 6,
            default_delivery_days: 21,
            fallback_featured: 10,
        }
    }
}

impl CurationConfig {
    /// Default configuration adjusted for the given input source. Manual
    /// entries and CSV sheets carry little metadata, so they are held to a
    /// lower bar.
    pub fn for_source(source: InputSource) -> Self {
        Self {
            min_score: min_score_for(source),
            ..Self::default()
        }
    }

    /// Reads a JSON configuration file and validates it. A file that does
    /// not set `min_score` gets the threshold of the input source.
    pub fn load(path: &Path, source: InputSource) -> Result<Self> {
        if !path.exists() {
            return Err(CurationError::MissingInput(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&data)?;
        let sets_min_score = document.get("min_score").is_some();
        let mut config: Self = serde_json::from_value(document)?;
        if !sets_min_score {
            config.min_score = min_score_for(source);
        }
        config.validate()?;
        Ok(config)
    }

    /// Cost floor for a category slug.
    pub fn min_cost_for(&self, category: &str) -> f64 {
        self.min_cost_usd
            .get(category)
            .copied()
            .unwrap_or(self.default_min_cost_usd)
    }

    /// Checks that the numeric tables can drive the price positioner.
    pub fn validate(&self) -> Result<()> {
        if self.min_score > 100 {
            return Err(CurationError::InvalidConfig(format!(
                "min_score {} exceeds 100",
                self.min_score
            )));
        }
        if !(self.usd_to_aed > 0.0) {
            return Err(CurationError::InvalidConfig(format!(
                "usd_to_aed must be positive, got {}",
                self.usd_to_aed
            )));
        }
        if !(self.default_markup > 0.0) {
            return Err(CurationError::InvalidConfig(format!(
                "default_markup must be positive, got {}",
                self.default_markup
            )));
        }
        for tier in &self.markup_tiers {
            if !(tier.low < tier.high) {
                return Err(CurationError::InvalidConfig(format!(
                    "markup tier [{}, {}) is empty",
                    tier.low, tier.high
                )));
            }
            if !(tier.multiplier > 0.0) {
                return Err(CurationError::InvalidConfig(format!(
                    "markup tier [{}, {}) has non-positive multiplier {}",
                    tier.low, tier.high, tier.multiplier
                )));
            }
        }
        if let Some(premium) = self
            .material_premiums
            .iter()
            .find(|premium| !(premium.multiplier > 0.0))
        {
            return Err(CurationError::InvalidConfig(format!(
                "material premium '{}' has non-positive multiplier {}",
                premium.keyword, premium.multiplier
            )));
        }
        Ok(())
    }
}

fn min_score_for(source: InputSource) -> u8 {
    match source {
        InputSource::Manual | InputSource::Csv => MANUAL_ENTRY_MIN_SCORE,
        InputSource::Api | InputSource::Records => CurationConfig::default().min_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_published_tables() {
        let config = CurationConfig::default();
        assert_eq!(config.min_score, 40);
        assert_eq!(config.min_cost_for("chairs"), 25.0);
        assert_eq!(config.min_cost_for("lamps"), 15.0);
        assert_eq!(config.markup_tiers.len(), 5);
        assert_eq!(config.material_premiums[0].keyword, "marble");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn manual_entry_lowers_the_threshold() {
        assert_eq!(CurationConfig::for_source(InputSource::Manual).min_score, 35);
        assert_eq!(CurationConfig::for_source(InputSource::Csv).min_score, 35);
        assert_eq!(CurationConfig::for_source(InputSource::Api).min_score, 40);
        assert_eq!(CurationConfig::for_source(InputSource::Records).min_score, 40);
    }

    #[test]
    fn loaded_file_keeps_the_source_threshold_unless_it_sets_one() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rate_only = temp_dir.path().join("rate.json");
        std::fs::write(&rate_only, r#"{ "usd_to_aed": 3.5 }"#).unwrap();
        let config = CurationConfig::load(&rate_only, InputSource::Manual).unwrap();
        assert_eq!(config.min_score, 35);
        assert_eq!(config.usd_to_aed, 3.5);
        assert_eq!(CurationConfig::load(&rate_only, InputSource::Api).unwrap().min_score, 40);

        let explicit = temp_dir.path().join("explicit.json");
        std::fs::write(&explicit, r#"{ "min_score": 50 }"#).unwrap();
        assert_eq!(CurationConfig::load(&explicit, InputSource::Csv).unwrap().min_score, 50);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let error = CurationConfig::load(&temp_dir.path().join("absent.json"), InputSource::Api)
            .unwrap_err();
        assert!(matches!(error, CurationError::MissingInput(_)));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: CurationConfig =
            serde_json::from_str(r#"{ "min_score": 55, "usd_to_aed": 3.5 }"#).unwrap();
        assert_eq!(config.min_score, 55);
        assert_eq!(config.usd_to_aed, 3.5);
        assert_eq!(config.default_markup, 2.5);
        assert_eq!(config.featured_floor, 6);
    }

    #[test]
    fn validate_rejects_non_positive_rate() {
        let config = CurationConfig {
            usd_to_aed: 0.0,
            ..CurationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CurationError::InvalidConfig(message)) if message.contains("usd_to_aed")
        ));
    }

    #[test]
    fn validate_rejects_inverted_tier() {
        let mut config = CurationConfig::default();
        config.markup_tiers.push(MarkupTier::new(500.0, 100.0, 2.0));
        assert!(config.validate().is_err());
    }
}
