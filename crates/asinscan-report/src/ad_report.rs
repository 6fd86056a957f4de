//! ASIN extraction from advertising report spreadsheets.
//!
//! The upstream report carries identifiers in two known sheets, one known
//! column each. Missing sheets or columns are skipped with a warning — the
//! report format drifts and a partial extraction is still useful.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use asinscan_core::{dedupe, Asin};

use crate::error::ReportError;

const TARGET_SHEETS: [&str; 2] = ["Sponsored Products Campaigns", "Sponsored Display Campaigns"];
const ASIN_COLUMN: &str = "ASIN (Informational only)";

/// Reads the ad report and returns the cleaned, deduplicated ASIN list in
/// first-seen order.
///
/// # Errors
///
/// Returns [`ReportError::Spreadsheet`] only when the file itself cannot be
/// opened; per-sheet and per-cell problems degrade to skips.
pub fn extract_ad_report_asins(path: &Path) -> Result<Vec<Asin>, ReportError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut found = Vec::new();

    for sheet in TARGET_SHEETS {
        let range = match workbook.worksheet_range(sheet) {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(sheet, error = %err, "sheet not readable — skipping");
                continue;
            }
        };

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            tracing::warn!(sheet, "sheet is empty — skipping");
            continue;
        };
        let Some(column) = header.iter().position(|cell| cell_text(cell) == ASIN_COLUMN) else {
            tracing::warn!(sheet, column = ASIN_COLUMN, "column not present — skipping");
            continue;
        };

        let before = found.len();
        found.extend(
            rows.filter_map(|row| row.get(column))
                .filter_map(|cell| Asin::parse(&cell_text(cell))),
        );
        tracing::debug!(sheet, count = found.len() - before, "ASINs extracted");
    }

    Ok(dedupe(found))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_owned(),
    }
}
