use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, Formula, Workbook, Worksheet};

use crate::unicorn::furniture::curate::naming::title_case;
use crate::unicorn::furniture::error::Result;
use crate::unicorn::furniture::model::CuratedProduct;

pub const PRODUCTS_SHEET: &str = "Products";
pub const CATEGORIES_SHEET: &str = "Categories";

/// Column layout of the product sheet. The storefront tooling and the
/// catalog export both address columns by these names.
pub const PRODUCT_COLUMNS: [&str; 25] = [
    "product_id",
    "name",
    "category",
    "subcategory",
    "price_aed",
    "old_price_aed",
    "badge",
    "description",
    "colors",
    "sizes",
    "image_url_1",
    "image_url_2",
    "image_url_3",
    "image_url_4",
    "supplier",
    "supplier_sku",
    "cost_aed",
    "margin_%",
    "stock_qty",
    "delivery_days",
    "featured",
    "active",
    "ae_url",
    "ae_orders",
    "ae_rating",
];

pub const CATEGORY_COLUMNS: [&str; 5] = [
    "category_id",
    "name",
    "display_order",
    "image_url",
    "description",
];

const HEADER_BACKGROUND: u32 = 0x1A1A1A;
const SUPPLIER_PREFIX: &str = "AE-";
const SUPPLIER_NAME: &str = "AliExpress";

const COLUMN_WIDTHS: [(u16, f64); 6] = [
    (0, 16.0),
    (1, 40.0),
    (2, 14.0),
    (4, 12.0),
    (10, 50.0),
    (22, 60.0),
];

/// Writes curated products to the product workbook: a `Products` sheet in
/// the fixed column layout and a `Categories` sheet with one row per
/// category, in order of first appearance.
pub fn write_products(path: &Path, products: &[CuratedProduct]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_align(FormatAlign::Center);

    let products_sheet = workbook.add_worksheet();
    products_sheet.set_name(PRODUCTS_SHEET)?;
    write_header(products_sheet, &PRODUCT_COLUMNS, &header_format)?;
    for (index, product) in products.iter().enumerate() {
        write_product_row((index + 1) as u32, products_sheet, product)?;
    }
    for (col, width) in COLUMN_WIDTHS {
        products_sheet.set_column_width(col, width)?;
    }
    products_sheet.set_freeze_panes(1, 0)?;
    let last_col = (PRODUCT_COLUMNS.len() - 1) as u16;
    products_sheet.autofilter(0, 0, products.len() as u32, last_col)?;

    let categories_sheet = workbook.add_worksheet();
    categories_sheet.set_name(CATEGORIES_SHEET)?;
    write_header(categories_sheet, &CATEGORY_COLUMNS, &header_format)?;
    for (index, category) in category_order(products).iter().enumerate() {
        let row = (index + 1) as u32;
        categories_sheet.write_string(row, 0, *category)?;
        categories_sheet.write_string(row, 1, title_case(&category.replace('-', " ")))?;
        categories_sheet.write_number(row, 2, (index + 1) as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<()> {
    for (col_idx, header) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, *header, format)?;
    }
    Ok(())
}

fn write_product_row(row: u32, worksheet: &mut Worksheet, product: &CuratedProduct) -> Result<()> {
    let excel_row = row + 1;
    let from_supplier = product.product_id.starts_with(SUPPLIER_PREFIX);

    worksheet.write_string(row, 0, &product.product_id)?;
    worksheet.write_string(row, 1, &product.name)?;
    worksheet.write_string(row, 2, &product.category)?;
    worksheet.write_number(row, 4, f64::from(product.price_aed))?;
    if let Some(old_price) = product.old_price_aed {
        worksheet.write_number(row, 5, f64::from(old_price))?;
    }
    worksheet.write_string(row, 6, product.badge.label())?;
    worksheet.write_string(row, 7, &product.description)?;
    worksheet.write_string(row, 8, product.colors.join(", "))?;
    worksheet.write_string(row, 9, product.sizes.join(", "))?;
    for (slot, image) in product.images.iter().take(4).enumerate() {
        worksheet.write_string(row, 10 + slot as u16, image)?;
    }
    if from_supplier {
        worksheet.write_string(row, 14, SUPPLIER_NAME)?;
        worksheet.write_string(row, 15, &product.product_id)?;
    }
    worksheet.write_number(row, 16, f64::from(product.cost_aed))?;
    worksheet.write_formula(
        row,
        17,
        Formula::new(format!(
            "=IF(E{excel_row}>0,ROUND((E{excel_row}-Q{excel_row})/E{excel_row}*100,1),0)"
        )),
    )?;
    worksheet.write_number(row, 18, 0.0)?;
    worksheet.write_number(row, 19, f64::from(product.delivery_days))?;
    worksheet.write_string(row, 20, yes_no(product.featured))?;
    worksheet.write_string(row, 21, yes_no(product.active))?;
    worksheet.write_string(row, 22, &product.source_url)?;
    worksheet.write_number(row, 23, product.source_orders as f64)?;
    worksheet.write_string(row, 24, &product.source_rating)?;
    Ok(())
}

fn category_order(products: &[CuratedProduct]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for product in products {
        if !categories.contains(&product.category.as_str()) {
            categories.push(&product.category);
        }
    }
    categories
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}
