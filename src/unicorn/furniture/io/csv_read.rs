use std::path::Path;

use tracing::debug;

use crate::unicorn::furniture::error::Result;
use crate::unicorn::furniture::source::CsvRow;

/// Reads every data row of a product CSV. The first line is the header.
pub fn read_rows(path: &Path) -> Result<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(CsvRow::new(&headers, &record));
    }

    debug!(rows = rows.len(), columns = headers.len(), "read product CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicorn::furniture::source::ProductSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn skips_blank_lines_and_keeps_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,price,category").unwrap();
        writeln!(file, "Velvet Bed,\"1,899\",beds").unwrap();
        writeln!(file, ",,").unwrap();
        writeln!(file, "Oak Table,899,").unwrap();
        file.flush().unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        let second = rows[1].clone().into_raw(1);
        assert_eq!(second.text("name").as_deref(), Some("Oak Table"));
        assert_eq!(second.text("category").as_deref(), Some("tables"));
    }
}
