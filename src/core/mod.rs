//! Core business logic abstractions

pub mod cache;
pub mod catalogue;
pub mod config;
pub mod log;
pub mod money;
pub mod pricing;
pub mod rate;

// Re-export main types for cleaner imports
pub use catalogue::{Catalogue, CatalogueItem};
pub use pricing::{PriceBreakdown, PricingParameters, compute_price};
pub use rate::{GoldRateProvider, RateQuery, RateResult, RateSource};
