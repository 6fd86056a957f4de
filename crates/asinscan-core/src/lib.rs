pub mod app_config;
pub mod asin;
pub mod config;
pub mod marketplace;
pub mod records;
pub mod seed_map;

pub use app_config::AppConfig;
pub use asin::{dedupe, parse_list, union, Asin};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use marketplace::{Marketplace, MarketplaceTable};
pub use records::{
    CompetitorRecord, OfferRecord, ProductRecord, BADGE_UNAVAILABLE, NOT_AVAILABLE, NO_DISCOUNT,
};
pub use seed_map::SearchSeedMap;
