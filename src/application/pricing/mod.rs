pub mod config;
pub mod price_fetcher;
pub mod types;

pub use price_fetcher::PriceFetcher;
pub use types::PriceSummary;
