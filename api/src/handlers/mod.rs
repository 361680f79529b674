//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod activity;

pub use activity::get_activity;
