use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::unicorn::furniture::config::CurationConfig;
use crate::unicorn::furniture::curate::{CurationReport, Curator, passthrough};
use crate::unicorn::furniture::error::{CurationError, Result};
use crate::unicorn::furniture::io::catalog::{self, Catalog};
use crate::unicorn::furniture::io::{csv_read, excel_read, excel_write, json_read};
use crate::unicorn::furniture::model::{InputSource, RawProduct};
use crate::unicorn::furniture::source::collect_raw;

/// Loads a product source file and converts every record to a
/// [`RawProduct`]. Repeated product ids keep their first occurrence.
#[instrument(level = "debug", skip_all, fields(input = %input.display(), %source))]
pub fn read_raw_products(
    input: &Path,
    source: InputSource,
    category: Option<&str>,
) -> Result<Vec<RawProduct>> {
    if !input.exists() {
        return Err(CurationError::MissingInput(input.to_path_buf()));
    }
    let raw_products = match source {
        InputSource::Csv => collect_raw(csv_read::read_rows(input)?),
        shape => json_read::read_products(input, shape, category)?,
    };
    Ok(dedup_by_id(raw_products))
}

fn dedup_by_id(raw_products: Vec<RawProduct>) -> Vec<RawProduct> {
    let total = raw_products.len();
    let mut seen = HashSet::new();
    let unique: Vec<RawProduct> = raw_products
        .into_iter()
        .filter(|product| match product.text("product_id") {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect();
    if unique.len() < total {
        debug!(dropped = total - unique.len(), "duplicate product ids removed");
    }
    unique
}

/// Curates a product source file into the product workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), %source)
)]
pub fn curate_to_workbook(
    input: &Path,
    output: &Path,
    source: InputSource,
    category: Option<&str>,
    curator: &Curator,
) -> Result<CurationReport> {
    let raw_products = read_raw_products(input, source, category)?;
    info!(count = raw_products.len(), "read raw products");
    let curation = curator.curate(&raw_products);
    debug!(
        featured = curation.products.iter().filter(|product| product.featured).count(),
        "curated products ranked"
    );
    excel_write::write_products(output, &curation.products)?;
    Ok(curation.report)
}

/// Imports a product source file into the product workbook without
/// curation. Returns the number of products written.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), %source)
)]
pub fn import_to_workbook(
    input: &Path,
    output: &Path,
    source: InputSource,
    category: Option<&str>,
    config: &CurationConfig,
) -> Result<usize> {
    let raw_products = read_raw_products(input, source, category)?;
    let products = passthrough(&raw_products, source, config);
    excel_write::write_products(output, &products)?;
    Ok(products.len())
}

/// Publishes the active rows of a product workbook as a storefront
/// catalog document.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_catalog(input: &Path, output: &Path) -> Result<Catalog> {
    if !input.exists() {
        return Err(CurationError::MissingInput(input.to_path_buf()));
    }
    let catalog = excel_read::read_catalog(input)?;
    info!(
        products = catalog.products.len(),
        categories = catalog.categories.len(),
        featured = catalog.featured().count(),
        "read catalog from workbook"
    );
    catalog::write_catalog(output, &catalog)?;
    Ok(catalog)
}
