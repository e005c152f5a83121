pub mod market_api;

pub use market_api::MarketApiClient;
