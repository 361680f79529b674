//! Domain layer
//!
//! Contains pure models with no I/O.
//! - `entities`: the unified activity model
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
