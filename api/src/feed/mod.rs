//! Feed module
//!
//! Human-readable feed rendering.

pub mod renderer;

pub use renderer::render_activity;
