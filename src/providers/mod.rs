pub mod caching;
pub mod gold_api;
pub mod metals_api;
