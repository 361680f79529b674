//! Activity source port trait
//!
//! One implementation per upstream service. Each is a full pipeline:
//! paginated fetch, normalization, and dropping of unrecognized events.

use async_trait::async_trait;

use crate::domain::entities::{ActivityEvent, Source};
use crate::error::FetchError;

#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Which service this pipeline reads from
    fn source(&self) -> Source;

    /// Fetch every available page for `identity` and normalize it.
    ///
    /// Fails as a whole on the first upstream failure; never returns
    /// partial results.
    async fn fetch_activity(&self, identity: &str) -> Result<Vec<ActivityEvent>, FetchError>;
}
