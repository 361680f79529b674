//! GitHub public events fetcher
//!
//! Pages through `GET /users/{username}/events/public`. The first URL is built
//! from `page`/`per_page`; every following URL is taken verbatim from the
//! `rel="next"` entry of the `Link` header.

use std::sync::Arc;

use async_trait::async_trait;
use urlencoding::encode;

use crate::config::{clamp_page_size, Config};
use crate::domain::entities::{ActivityEvent, Normalized, Source};
use crate::domain::ports::{ActivitySource, HttpTransport};
use crate::error::FetchError;

use super::normalize::normalize;
use super::schema::GithubEvent;

/// GitHub pipeline: paginated fetch, normalization, filtering
pub struct GithubActivitySource<T: HttpTransport> {
    transport: Arc<T>,
    api_url: String,
    web_url: String,
    page_size: u32,
    max_pages: Option<u32>,
}

impl<T: HttpTransport> GithubActivitySource<T> {
    pub fn new(transport: Arc<T>, config: &Config) -> Self {
        Self {
            transport,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            web_url: config.github_web_url.trim_end_matches('/').to_string(),
            page_size: clamp_page_size(config.github_page_size),
            max_pages: config.max_pages,
        }
    }

    fn first_page_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/events/public?page=1&per_page={}",
            self.api_url,
            encode(username),
            self.page_size
        )
    }

    /// Fetch every page of raw events, in upstream order.
    ///
    /// Stops on an empty page, on a missing continuation, or on a page that
    /// is not a JSON array. Without `max_pages` every advertised page is
    /// fetched; with it, the fetch stops there and warns. A non-2xx page
    /// aborts the whole fetch.
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<GithubEvent>, FetchError> {
        let mut events = Vec::new();
        let mut next = Some(self.first_page_url(username));
        let mut page = 0u32;

        while let Some(url) = next.take() {
            if let Some(max_pages) = self.max_pages.filter(|max| page >= *max) {
                tracing::warn!(
                    source = %Source::CodeHost,
                    identity = username,
                    max_pages,
                    "Page limit reached, stopping pagination"
                );
                break;
            }
            page += 1;

            let response = self.transport.get_json(&url).await?;
            let link = response.link;

            let items = match response.body {
                serde_json::Value::Array(items) => items,
                other => {
                    tracing::warn!(
                        source = %Source::CodeHost,
                        page,
                        url = %url,
                        body_kind = json_kind(&other),
                        "Malformed page, expected an array of events"
                    );
                    break;
                }
            };

            tracing::debug!(
                source = %Source::CodeHost,
                identity = username,
                page,
                count = items.len(),
                "Fetched page"
            );

            if items.is_empty() {
                break;
            }

            for item in items {
                match serde_json::from_value::<GithubEvent>(item) {
                    Ok(event) => events.push(event),
                    Err(e) => {
                        tracing::debug!(error = %e, "Skipping event with unexpected shape")
                    }
                }
            }

            next = link.as_deref().and_then(next_page_url);
        }

        Ok(events)
    }
}

#[async_trait]
impl<T: HttpTransport> ActivitySource for GithubActivitySource<T> {
    fn source(&self) -> Source {
        Source::CodeHost
    }

    async fn fetch_activity(&self, identity: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        let raw = self.fetch_events(identity).await?;
        let fetched = raw.len();

        let events: Vec<ActivityEvent> = raw
            .iter()
            .filter_map(|event| {
                let normalized = normalize(event, &self.web_url);
                if let Normalized::Unrecognized(what) = &normalized {
                    tracing::debug!(
                        source = %Source::CodeHost,
                        event = %what,
                        "Dropping unrecognized event"
                    );
                }
                normalized.into_event()
            })
            .collect();

        tracing::info!(
            source = %Source::CodeHost,
            identity,
            fetched,
            kept = events.len(),
            "Fetched activity"
        );

        Ok(events)
    }
}

/// Extract the `rel="next"` URL from a `Link` header
///
/// Format: `<url>; rel="next", <url>; rel="last"`
#[allow(clippy::let_and_return)]
pub fn next_page_url(link_header: &str) -> Option<String> {
    let re = regex::Regex::new(r#"<([^>]+)>\s*;\s*rel="([^"]*)""#).ok()?;

    let next = re
        .captures_iter(link_header)
        .find(|caps| caps[2].split_whitespace().any(|rel| rel == "next"))
        .map(|caps| caps[1].to_string());
    next
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
