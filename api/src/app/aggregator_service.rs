//! Aggregator service
//!
//! Runs one pipeline per supplied identity concurrently, then merges both
//! streams into a single feed, most recent first.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::entities::ActivityEvent;
use crate::domain::ports::ActivitySource;
use crate::error::FetchError;

/// Identities supplied by the caller, at most one per source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Identities {
    /// GitHub username
    pub code_host: Option<String>,
    /// StackExchange numeric user id
    pub qa_host: Option<String>,
}

impl Identities {
    /// Blank identities count as not supplied
    pub fn new(code_host: Option<String>, qa_host: Option<String>) -> Self {
        Self {
            code_host: non_blank(code_host),
            qa_host: non_blank(qa_host),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code_host.is_none() && self.qa_host.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service for building the merged activity feed
pub struct AggregatorService<CH, QA>
where
    CH: ActivitySource,
    QA: ActivitySource,
{
    code_host: Arc<CH>,
    qa_host: Arc<QA>,
    timeout: Option<Duration>,
}

impl<CH, QA> AggregatorService<CH, QA>
where
    CH: ActivitySource,
    QA: ActivitySource,
{
    pub fn new(code_host: Arc<CH>, qa_host: Arc<QA>) -> Self {
        Self {
            code_host,
            qa_host,
            timeout: None,
        }
    }

    /// Bound a whole aggregation call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fetch, merge and sort activity for the supplied identities.
    ///
    /// Sources without an identity contribute nothing and are never called.
    /// Nothing is cached: every call re-fetches in full. The first pipeline
    /// failure fails the whole call.
    pub async fn aggregate(
        &self,
        identities: &Identities,
    ) -> Result<Vec<ActivityEvent>, FetchError> {
        tracing::info!(
            code_host = identities.code_host.as_deref(),
            qa_host = identities.qa_host.as_deref(),
            "Aggregating activity"
        );

        let events = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.collect(identities))
                .await
                .map_err(|_| FetchError::Timeout(limit))??,
            None => self.collect(identities).await?,
        };

        tracing::info!(count = events.len(), "Aggregated activity");
        Ok(events)
    }

    async fn collect(&self, identities: &Identities) -> Result<Vec<ActivityEvent>, FetchError> {
        let (mut events, qa_host) = tokio::try_join!(
            fetch_optional(self.code_host.as_ref(), identities.code_host.as_deref()),
            fetch_optional(self.qa_host.as_ref(), identities.qa_host.as_deref()),
        )?;

        events.extend(qa_host);
        sort_most_recent_first(&mut events);
        Ok(events)
    }
}

async fn fetch_optional<S: ActivitySource>(
    source: &S,
    identity: Option<&str>,
) -> Result<Vec<ActivityEvent>, FetchError> {
    let Some(identity) = identity else {
        return Ok(Vec::new());
    };

    tracing::debug!(source = %source.source(), identity, "Fetching activity");
    source.fetch_activity(identity).await
}

/// Descending by `when`; equal instants keep their input order
pub fn sort_most_recent_first(events: &mut [ActivityEvent]) {
    events.sort_by(|a, b| b.when.cmp(&a.when));
}
