//! Domain entities
//!
//! Source-agnostic models the rest of the crate works with.

pub mod action;
pub mod activity_event;

pub use action::{Action, CodeHostAction, QaHostAction};
pub use activity_event::{ActivityEvent, Link, Normalized, Place, Source, Subject, What, Who};
