use std::collections::HashMap;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::unicorn::furniture::error::{CurationError, Result};
use crate::unicorn::furniture::io::catalog::{Catalog, CatalogCategory, CatalogProduct, slugify};
use crate::unicorn::furniture::io::excel_write::{CATEGORIES_SHEET, PRODUCTS_SHEET};
use crate::unicorn::furniture::model::{Badge, split_list};
use crate::unicorn::furniture::source::LOCAL_DELIVERY_DAYS;
use crate::unicorn::furniture::source::category::UNKNOWN_CATEGORY;

const IMAGE_SLOTS: usize = 4;

/// Rows of a sheet addressed by header name.
struct Sheet {
    columns: HashMap<String, usize>,
    range: Range<DataType>,
}

impl Sheet {
    fn new(range: Range<DataType>) -> Self {
        let columns: HashMap<String, usize> = range
            .rows()
            .next()
            .map(|header| {
                header
                    .iter()
                    .enumerate()
                    .map(|(index, cell)| (cell_to_string(Some(cell)).trim().to_lowercase(), index))
                    .filter(|(name, _)| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { columns, range }
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.range.rows().skip(1).map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }
}

struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    cells: &'a [DataType],
}

impl Row<'_> {
    fn text(&self, column: &str) -> String {
        let cell = self
            .columns
            .get(column)
            .and_then(|index| self.cells.get(*index));
        cell_to_string(cell).trim().to_string()
    }

    fn number(&self, column: &str) -> Option<f64> {
        let cell = self
            .columns
            .get(column)
            .and_then(|index| self.cells.get(*index))?;
        match cell {
            DataType::Float(value) => Some(*value),
            DataType::Int(value) => Some(*value as f64),
            DataType::String(value) => value.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell_to_string(Some(cell)).trim().is_empty())
    }
}

/// Reads a product workbook back into a publishable catalog.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let products = read_products(&mut workbook)?;
    let categories = read_categories(&mut workbook)?;
    Ok(Catalog::assemble(products, categories))
}

/// Reads the active products of the `Products` sheet.
///
/// Rows whose `active` column is anything but `YES` are skipped; a sheet
/// without that column publishes every row.
pub fn read_products<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
) -> Result<Vec<CatalogProduct>> {
    let sheet = Sheet::new(read_required_sheet(workbook, PRODUCTS_SHEET)?);
    if !sheet.has_column("product_id") && !sheet.has_column("name") {
        return Err(CurationError::InvalidWorkbook(format!(
            "sheet '{PRODUCTS_SHEET}' has neither a product_id nor a name column"
        )));
    }
    let filter_active = sheet.has_column("active");

    let mut products = Vec::new();
    for row in sheet.rows() {
        if row.is_blank() {
            continue;
        }
        if filter_active && !row.text("active").eq_ignore_ascii_case("YES") {
            continue;
        }
        products.push(product_from_row(&row, products.len()));
    }
    Ok(products)
}

/// Reads the `Categories` sheet. A workbook without one yields no
/// categories.
pub fn read_categories<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
) -> Result<Vec<CatalogCategory>> {
    let Some(range) = workbook.worksheet_range(CATEGORIES_SHEET) else {
        return Ok(Vec::new());
    };
    let sheet = Sheet::new(range?);

    Ok(sheet
        .rows()
        .filter(|row| !row.text("category_id").is_empty())
        .map(|row| CatalogCategory {
            id: row.text("category_id"),
            name: row.text("name"),
            image: row.text("image_url"),
            description: row.text("description"),
            count: 0,
        })
        .collect())
}

fn product_from_row(row: &Row<'_>, position: usize) -> CatalogProduct {
    let id = Some(row.text("product_id"))
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("P{}", position + 1));
    let name = Some(row.text("name"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());
    let category = Some(row.text("category"))
        .filter(|category| !category.is_empty())
        .map(|category| slugify(&category))
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    let images = (1..=IMAGE_SLOTS)
        .map(|slot| row.text(&format!("image_url_{slot}")))
        .filter(|url| url.starts_with("http"))
        .collect();
    let badge = Some(row.text("badge")).filter(|badge| !badge.is_empty());
    if let Some(label) = badge.as_deref().filter(|label| Badge::from_label(label).is_none()) {
        debug!(%id, %label, "unrecognised badge kept as written");
    }

    CatalogProduct {
        id,
        name,
        category,
        price: whole(row.number("price_aed")).unwrap_or(0),
        old_price: whole(row.number("old_price_aed")).filter(|price| *price > 0),
        badge,
        description: row.text("description"),
        colors: split_list(&row.text("colors")),
        sizes: split_list(&row.text("sizes")),
        images,
        featured: row.text("featured").eq_ignore_ascii_case("YES"),
        delivery_days: whole(row.number("delivery_days")).unwrap_or(LOCAL_DELIVERY_DAYS),
    }
}

fn whole(value: Option<f64>) -> Option<u32> {
    value
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.trunc().min(f64::from(u32::MAX)) as u32)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| CurationError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(CurationError::from)?;
    Ok(range)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
