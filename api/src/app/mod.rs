//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod aggregator_service;

pub use aggregator_service::{AggregatorService, Identities};
