use serde::{Deserialize, Serialize};

use crate::unicorn::furniture::model::{RawProduct, split_list};
use crate::unicorn::furniture::source::category::guess_category;
use crate::unicorn::furniture::source::{LOCAL_DELIVERY_DAYS, ProductSource};

/// Display price used when an entry was saved without one.
pub const DEFAULT_ENTRY_PRICE_AED: u32 = 999;

/// A product typed in by hand. Supplier cost is never known for these, so
/// pricing falls back to the entered display price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntry {
    pub name: String,
    pub category: Option<String>,
    pub price_aed: Option<u32>,
    pub image: Option<String>,
    /// Comma-separated colour names.
    pub colors: String,
    /// Comma-separated sizes.
    pub sizes: String,
}

impl ProductSource for ManualEntry {
    fn into_raw(self, index: usize) -> RawProduct {
        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| guess_category(&self.name).to_string());
        let images: Vec<String> = self
            .image
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        RawProduct::new()
            .with("product_id", format!("UF-{:03}", index + 1))
            .with("name", self.name)
            .with("category", category)
            .with("price_aed", self.price_aed.unwrap_or(DEFAULT_ENTRY_PRICE_AED))
            .with("images", images)
            .with("colors", split_list(&self.colors))
            .with("sizes", split_list(&self.sizes))
            .with("cost_aed", 0)
            .with("delivery_days", LOCAL_DELIVERY_DAYS)
    }
}
