use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("workbook write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
