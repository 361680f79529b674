//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! `ScriptedTransport` sits under the real fetchers, so pagination and
//! normalization run unchanged in tests. `StaticActivitySource` replaces a
//! whole pipeline when only the aggregator or the handlers are under test.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
