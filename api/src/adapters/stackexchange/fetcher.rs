//! StackExchange user timeline fetcher
//!
//! Pages through `GET /users/{id}/timeline` by incrementing `page` until the
//! body reports `has_more: false`. There is no header continuation here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use urlencoding::encode;

use crate::config::{clamp_page_size, Config};
use crate::domain::entities::{ActivityEvent, Normalized, Source};
use crate::domain::ports::{ActivitySource, HttpTransport};
use crate::error::FetchError;

use super::normalize::normalize;
use super::schema::{TimelineEntry, TimelinePage};

/// Remaining daily quota below which we start warning
const LOW_QUOTA: i64 = 50;

/// StackExchange pipeline: paginated fetch, normalization, filtering
pub struct StackExchangeActivitySource<T: HttpTransport> {
    transport: Arc<T>,
    api_url: String,
    site: String,
    filter: String,
    page_size: u32,
    max_pages: Option<u32>,
}

impl<T: HttpTransport> StackExchangeActivitySource<T> {
    pub fn new(transport: Arc<T>, config: &Config) -> Self {
        Self {
            transport,
            api_url: config.stackexchange_api_url.trim_end_matches('/').to_string(),
            site: config.stackexchange_site.clone(),
            filter: config.stackexchange_filter.clone(),
            page_size: clamp_page_size(config.stackexchange_page_size),
            max_pages: config.max_pages,
        }
    }

    fn page_url(&self, user_id: &str, page: u32) -> String {
        format!(
            "{}/users/{}/timeline?site={}&page={}&pagesize={}&filter={}",
            self.api_url,
            encode(user_id),
            encode(&self.site),
            page,
            self.page_size,
            encode(&self.filter)
        )
    }

    /// Fetch every page of timeline entries, in upstream order.
    ///
    /// Stops exactly when `has_more` is false. A page missing `items` or
    /// `has_more` terminates pagination (keeping what it carried); a
    /// non-2xx page aborts the whole fetch. Only a configured `max_pages`
    /// stops earlier, with a warning.
    pub async fn fetch_timeline(&self, user_id: &str) -> Result<Vec<TimelineEntry>, FetchError> {
        let mut entries = Vec::new();
        let mut page = 1u32;

        loop {
            if let Some(max_pages) = self.max_pages.filter(|max| page > *max) {
                tracing::warn!(
                    source = %Source::QaHost,
                    identity = user_id,
                    max_pages,
                    "Page limit reached, stopping pagination"
                );
                break;
            }

            let url = self.page_url(user_id, page);
            let response = self.transport.get_json(&url).await?;

            let body: TimelinePage = match serde_json::from_value(response.body) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        source = %Source::QaHost,
                        page,
                        error = %e,
                        "Malformed page, stopping pagination"
                    );
                    break;
                }
            };

            let Some(items) = body.items else {
                tracing::warn!(
                    source = %Source::QaHost,
                    page,
                    "Page has no items, stopping pagination"
                );
                break;
            };

            tracing::debug!(
                source = %Source::QaHost,
                identity = user_id,
                page,
                count = items.len(),
                "Fetched page"
            );

            for item in items {
                match serde_json::from_value::<TimelineEntry>(item) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        tracing::debug!(error = %e, "Skipping timeline entry with unexpected shape")
                    }
                }
            }

            if let Some(quota) = body.quota_remaining {
                if quota < LOW_QUOTA {
                    tracing::warn!(
                        source = %Source::QaHost,
                        quota_remaining = quota,
                        "Low API quota"
                    );
                }
            }

            match body.has_more {
                Some(true) => {}
                Some(false) => break,
                None => {
                    tracing::warn!(
                        source = %Source::QaHost,
                        page,
                        "Page has no has_more flag, stopping pagination"
                    );
                    break;
                }
            }

            if let Some(secs) = body.backoff {
                tracing::warn!(source = %Source::QaHost, backoff_secs = secs, "Backing off");
                tokio::time::sleep(Duration::from_secs(secs)).await;
            }

            page += 1;
        }

        Ok(entries)
    }
}

#[async_trait]
impl<T: HttpTransport> ActivitySource for StackExchangeActivitySource<T> {
    fn source(&self) -> Source {
        Source::QaHost
    }

    async fn fetch_activity(&self, identity: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        let raw = self.fetch_timeline(identity).await?;
        let fetched = raw.len();

        let events: Vec<ActivityEvent> = raw
            .iter()
            .filter_map(|entry| {
                let normalized = normalize(entry);
                if let Normalized::Unrecognized(what) = &normalized {
                    tracing::debug!(
                        source = %Source::QaHost,
                        event = %what,
                        "Dropping unrecognized event"
                    );
                }
                normalized.into_event()
            })
            .collect();

        tracing::info!(
            source = %Source::QaHost,
            identity,
            fetched,
            kept = events.len(),
            "Fetched activity"
        );

        Ok(events)
    }
}
