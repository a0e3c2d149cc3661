//! File adapters: product sources on the way in, the product workbook and
//! the storefront catalog on the way out.

pub mod catalog;
pub mod csv_read;
pub mod excel_read;
pub mod excel_write;
pub mod json_read;
