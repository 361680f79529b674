//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod activity;
pub mod http;

pub use activity::ActivitySource;
pub use http::{HttpTransport, JsonResponse};
