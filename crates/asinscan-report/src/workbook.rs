//! Workbook writers for the Products/OtherSellers and Competitors
//! deliverables.
//!
//! Headers are always written, even for zero data rows, so downstream
//! consumers can rely on the sheet shape. Styling and highlighting are the
//! presentation layer's concern, not ours.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::ReportError;
use crate::schema::Table;

/// Writes the products workbook: a `Products` sheet and an `OtherSellers`
/// sheet.
///
/// # Errors
///
/// Returns [`ReportError::Xlsx`] if a sheet cannot be written or the file
/// cannot be saved.
pub fn write_products_workbook(
    path: &Path,
    products: &Table,
    other_sellers: &Table,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    write_sheet(workbook.add_worksheet(), "Products", products)?;
    write_sheet(workbook.add_worksheet(), "OtherSellers", other_sellers)?;
    workbook.save(path)?;
    tracing::info!(
        path = %path.display(),
        products = products.rows.len(),
        offers = other_sellers.rows.len(),
        "products workbook saved"
    );
    Ok(())
}

/// Writes the competitors workbook: a single `Competitors` sheet.
///
/// # Errors
///
/// Returns [`ReportError::Xlsx`] if the sheet cannot be written or the file
/// cannot be saved.
pub fn write_competitors_workbook(path: &Path, competitors: &Table) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    write_sheet(workbook.add_worksheet(), "Competitors", competitors)?;
    workbook.save(path)?;
    tracing::info!(
        path = %path.display(),
        rows = competitors.rows.len(),
        "competitors workbook saved"
    );
    Ok(())
}

fn write_sheet(sheet: &mut Worksheet, name: &str, table: &Table) -> Result<(), ReportError> {
    sheet.set_name(name)?;
    for (col, header) in table.columns.iter().enumerate() {
        sheet.write_string(0, u16::try_from(col).unwrap_or(u16::MAX), header)?;
    }
    for (row_index, row) in table.rows.iter().enumerate() {
        let sheet_row = u32::try_from(row_index).unwrap_or(u32::MAX) + 1;
        for (col, cell) in row.iter().enumerate() {
            sheet.write_string(sheet_row, u16::try_from(col).unwrap_or(u16::MAX), cell)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asinscan_core::{Asin, CompetitorRecord, ProductRecord};

    fn products_table() -> Table {
        let asin = Asin::parse("B0ABCDEFGH").unwrap();
        Table::products(&[ProductRecord::empty(&asin, "Amazon India")])
    }

    #[test]
    fn products_workbook_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.xlsx");

        write_products_workbook(&path, &products_table(), &Table::other_sellers(&[])).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn competitors_workbook_is_written_even_with_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("competitors.xlsx");

        let empty: Vec<CompetitorRecord> = Vec::new();
        write_competitors_workbook(&path, &Table::competitors(&empty)).unwrap();

        assert!(path.exists());
    }
}
