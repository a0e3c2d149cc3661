//! Storefront catalog document built from the product workbook.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::unicorn::furniture::curate::naming::title_case;
use crate::unicorn::furniture::error::Result;

/// Image shown for products saved without one.
const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1618221195710-dd6b41faaea6?w=600&q=80";

/// Per-category stock photography, keyed by slug.
const CATEGORY_PHOTOS: &[(&str, &str)] = &[
    ("beds", "photo-1505693416388-ac5ce068fe85"),
    ("sofas", "photo-1555041469-a586c61ea9bc"),
    ("dining", "photo-1617806118233-18e1de247200"),
    ("wardrobes", "photo-1558997519-83ea9252edf8"),
    ("chairs", "photo-1506439773649-6e0eb8cfb237"),
    ("accent-chairs", "photo-1506439773649-6e0eb8cfb237"),
    ("tables", "photo-1532372576444-dda954194ad0"),
    ("coffee-tables", "photo-1532372576444-dda954194ad0"),
    ("tv", "photo-1593062096033-9a26b09da705"),
    ("tv-cabinets", "photo-1593062096033-9a26b09da705"),
    ("nightstands", "photo-1551298370-9d3d53740c72"),
    ("dressing", "photo-1616486338812-3dadae4b4ace"),
    ("mattress", "photo-1631049307264-da0ec9d70304"),
    ("ottoman", "photo-1519643381401-22c77e60520e"),
    ("chaise", "photo-1519643381401-22c77e60520e"),
];

const PRODUCT_PHOTO_WIDTH: u32 = 600;
const CATEGORY_PHOTO_WIDTH: u32 = 800;

/// A product as published on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: u32,
    pub old_price: Option<u32>,
    pub badge: Option<String>,
    pub description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub delivery_days: u32,
}

/// A storefront category with the number of products listed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub count: usize,
}

impl CatalogCategory {
    /// Category derived from a slug when the workbook lists none.
    pub fn from_slug(slug: &str) -> Self {
        Self {
            id: slug.to_string(),
            name: title_case(&slug.replace('-', " ")),
            image: String::new(),
            description: String::new(),
            count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<CatalogProduct>,
    pub categories: Vec<CatalogCategory>,
}

impl Catalog {
    /// Completes workbook content for publishing.
    ///
    /// Products without images get their category's stock photo. When no
    /// categories were listed they are derived from the products. Every
    /// category is counted and given a default image, and empty ones are
    /// dropped.
    pub fn assemble(
        mut products: Vec<CatalogProduct>,
        mut categories: Vec<CatalogCategory>,
    ) -> Self {
        for product in &mut products {
            if product.images.is_empty() {
                product.images.push(
                    category_photo(&product.category, PRODUCT_PHOTO_WIDTH)
                        .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
                );
            }
        }

        if categories.is_empty() {
            for product in &products {
                if !categories.iter().any(|category| category.id == product.category) {
                    categories.push(CatalogCategory::from_slug(&product.category));
                }
            }
        }

        for category in &mut categories {
            category.count = products
                .iter()
                .filter(|product| product.category == category.id)
                .count();
            if category.image.is_empty() {
                category.image =
                    category_photo(&category.id, CATEGORY_PHOTO_WIDTH).unwrap_or_default();
            }
        }
        categories.retain(|category| category.count > 0);

        Self { products, categories }
    }

    pub fn featured(&self) -> impl Iterator<Item = &CatalogProduct> {
        self.products.iter().filter(|product| product.featured)
    }
}

/// Normalises a category label to the storefront slug form.
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().replace(" & ", "-").replace(' ', "-")
}

/// Writes the catalog as pretty-printed JSON.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

fn category_photo(slug: &str, width: u32) -> Option<String> {
    CATEGORY_PHOTOS
        .iter()
        .find(|(category, _)| *category == slug)
        .map(|(_, photo)| format!("https://images.unsplash.com/{photo}?w={width}&q=80"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, images: &[&str]) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            price: 999,
            old_price: None,
            badge: None,
            description: String::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            images: images.iter().map(|url| url.to_string()).collect(),
            featured: false,
            delivery_days: 14,
        }
    }

    #[test]
    fn slugify_joins_words() {
        assert_eq!(slugify("Sofas & Couches"), "sofas-couches");
        assert_eq!(slugify(" Coffee Tables "), "coffee-tables");
    }

    #[test]
    fn products_without_images_get_category_photo() {
        let catalog = Catalog::assemble(
            vec![product("A", "beds", &[]), product("B", "lamps", &[])],
            Vec::new(),
        );
        assert!(catalog.products[0].images[0].contains("photo-1505693416388-ac5ce068fe85?w=600"));
        assert_eq!(catalog.products[1].images[0], DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn categories_are_counted_and_empty_ones_dropped() {
        let listed = vec![
            CatalogCategory::from_slug("sofas"),
            CatalogCategory::from_slug("beds"),
            CatalogCategory::from_slug("coffee-tables"),
        ];
        let catalog = Catalog::assemble(
            vec![
                product("A", "beds", &["https://cdn.example/a.jpg"]),
                product("B", "beds", &["https://cdn.example/b.jpg"]),
                product("C", "coffee-tables", &["https://cdn.example/c.jpg"]),
            ],
            listed,
        );
        let summary: Vec<(&str, usize)> = catalog
            .categories
            .iter()
            .map(|category| (category.id.as_str(), category.count))
            .collect();
        assert_eq!(summary, vec![("beds", 2), ("coffee-tables", 1)]);
        assert_eq!(catalog.categories[1].name, "Coffee Tables");
        assert!(catalog.categories[1].image.contains("w=800"));
    }

    #[test]
    fn serialises_camel_case_fields() {
        let json = serde_json::to_value(product("A", "beds", &[])).unwrap();
        assert!(json.get("oldPrice").is_some());
        assert!(json.get("deliveryDays").is_some());
    }
}
