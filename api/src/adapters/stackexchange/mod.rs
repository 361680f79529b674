//! StackExchange adapter
//!
//! User timeline: raw wire shapes, normalizer and paginated fetcher.

pub mod fetcher;
pub mod normalize;
pub mod schema;

pub use fetcher::StackExchangeActivitySource;
