pub mod client;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod offers;
pub mod product;
mod retry;
mod text;

pub use client::RequestClient;
pub use error::ScrapeError;
pub use fetcher::{FetchOutcome, ProductFetcher};
pub use offers::parse_offers;
pub use product::parse_product;
