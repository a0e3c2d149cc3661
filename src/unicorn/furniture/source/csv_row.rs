//! Rows of a hand-maintained product CSV.
//!
//! Column names vary between suppliers, so each field is looked up under a
//! short list of aliases and the first non-empty cell wins.

use csv::StringRecord;

use crate::unicorn::furniture::model::RawProduct;
use crate::unicorn::furniture::source::category::guess_category;
use crate::unicorn::furniture::source::{LOCAL_DELIVERY_DAYS, ProductSource};

const PRICE_COLUMNS: [&str; 3] = ["price", "price_aed", "selling_price"];
/// Cost columns and the canonical key each one is stored under.
const COST_COLUMNS: [(&str, &str); 3] = [
    ("cost", "cost_aed"),
    ("cost_aed", "cost_aed"),
    ("cost_usd", "cost_usd"),
];
const MAIN_IMAGE_COLUMNS: [&str; 4] = ["image_url", "image", "image_url_1", "img"];
const EXTRA_IMAGE_COLUMNS: [&str; 3] = ["image_url_2", "image_url_3", "image_url_4"];
const TEXT_COLUMNS: [&str; 4] = ["description", "colors", "sizes", "badge"];

/// One data row paired with the header of its file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    cells: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new(headers: &StringRecord, record: &StringRecord) -> Self {
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.trim().to_lowercase(), value.trim().to_string()))
            .collect();
        Self { cells }
    }

    /// Non-empty cell under `column`.
    fn cell(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    fn first_cell(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|column| self.cell(column))
    }
}

impl ProductSource for CsvRow {
    fn into_raw(self, index: usize) -> RawProduct {
        let name = self
            .cell("name")
            .or_else(|| self.cells.first().map(|(_, value)| value.as_str()))
            .unwrap_or_default()
            .to_string();
        let category = self
            .cell("category")
            .map(str::to_string)
            .unwrap_or_else(|| guess_category(&name).to_string());
        let product_id = self
            .cell("product_id")
            .or_else(|| self.cell("sku"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("P{:03}", index + 1));

        let mut raw = RawProduct::new()
            .with("product_id", product_id)
            .with("name", name)
            .with("category", category);

        if let Some(price) = self.first_cell(&PRICE_COLUMNS) {
            raw.insert("price_aed", parse_amount(price).map(f64::trunc).unwrap_or(0.0));
        }
        if let Some(old_price) = self.cell("old_price").and_then(parse_amount) {
            raw.insert("old_price_aed", old_price.trunc());
        }
        let cost = COST_COLUMNS
            .iter()
            .find_map(|(column, key)| self.cell(column).map(|value| (*key, value)));
        let cost = cost.and_then(|(key, value)| Some((key, parse_amount(value)?)));
        if let Some((key, amount)) = cost {
            raw.insert(key, amount);
        }

        let mut images: Vec<String> = self
            .first_cell(&MAIN_IMAGE_COLUMNS)
            .map(|url| vec![url.to_string()])
            .unwrap_or_default();
        images.extend(
            EXTRA_IMAGE_COLUMNS
                .iter()
                .filter_map(|column| self.cell(column))
                .map(str::to_string),
        );
        raw.insert("images", images);

        for column in TEXT_COLUMNS {
            if let Some(value) = self.cell(column) {
                raw.insert(column, value);
            }
        }

        let delivery_days = self
            .cell("delivery_days")
            .and_then(parse_amount)
            .filter(|days| *days >= 1.0)
            .map(|days| days.trunc())
            .unwrap_or(f64::from(LOCAL_DELIVERY_DAYS));
        raw.insert("delivery_days", delivery_days);
        raw
    }
}

/// Parses a money cell such as `"AED 1,299"`.
fn parse_amount(cell: &str) -> Option<f64> {
    cell.replace(',', "")
        .replace("AED", "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(headers: &[&str], values: &[&str]) -> CsvRow {
        CsvRow::new(&StringRecord::from(headers.to_vec()), &StringRecord::from(values.to_vec()))
    }

    #[test]
    fn reads_aliased_columns() {
        let raw = row(
            &["Name", "selling_price", "cost_usd", "img", "image_url_3", "colors"],
            &[
                "Velvet Sofa",
                "AED 2,499",
                "310",
                "https://cdn.example/a.jpg",
                "https://cdn.example/c.jpg",
                "Grey, Green",
            ],
        )
        .into_raw(4);

        assert_eq!(raw.text("product_id").as_deref(), Some("P005"));
        assert_eq!(raw.text("category").as_deref(), Some("sofas"));
        assert_eq!(raw.number("price_aed"), Some(2499.0));
        assert_eq!(raw.number("cost_usd"), Some(310.0));
        assert_eq!(raw.text_list("images").len(), 2);
        assert_eq!(raw.text_list("colors"), vec!["Grey", "Green"]);
        assert_eq!(raw.count("delivery_days"), 14);
    }

    #[test]
    fn plain_cost_is_display_currency() {
        let raw = row(&["sku", "name", "cost"], &["SKU-9", "Oak Table", "1,100"]).into_raw(0);
        assert_eq!(raw.text("product_id").as_deref(), Some("SKU-9"));
        assert_eq!(raw.number("cost_aed"), Some(1100.0));
        assert!(!raw.contains("cost_usd"));
    }

    #[test]
    fn first_column_names_unlabelled_rows() {
        let raw = row(&["title", "category"], &["Marble Console", "TV"]).into_raw(0);
        assert_eq!(raw.text("name").as_deref(), Some("Marble Console"));
        assert_eq!(raw.text("category").as_deref(), Some("TV"));
    }
}
