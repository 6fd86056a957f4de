pub mod ad_report;
pub mod error;
pub mod schema;
pub mod workbook;

pub use ad_report::extract_ad_report_asins;
pub use error::ReportError;
pub use schema::{Table, COMPETITORS_SCHEMA, OTHER_SELLERS_SCHEMA, PRODUCTS_SCHEMA};
pub use workbook::{write_competitors_workbook, write_products_workbook};
