//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod github;
pub mod http;
pub mod stackexchange;

pub use github::GithubActivitySource;
pub use http::ReqwestTransport;
pub use stackexchange::StackExchangeActivitySource;
