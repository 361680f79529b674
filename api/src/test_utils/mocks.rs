//! Mock implementations of port traits
//!
//! In-memory implementations configured up front, recording what they were
//! asked for so tests can verify request sequences.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{ActivityEvent, Source};
use crate::domain::ports::{ActivitySource, HttpTransport, JsonResponse};
use crate::error::FetchError;

// ============================================================================
// Scripted HTTP Transport
// ============================================================================

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: u16,
    link: Option<String>,
    body: serde_json::Value,
}

/// Transport that answers from a URL-keyed script
///
/// Unscripted URLs answer 404, so a test that walks past its fixture fails
/// loudly instead of hanging on the network.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Arc<RwLock<HashMap<String, ScriptedResponse>>>,
    requested: Arc<RwLock<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a 200 page, optionally carrying a `Link` header
    pub fn with_page(self, url: &str, link: Option<&str>, body: serde_json::Value) -> Self {
        self.script(url, 200, link, body)
    }

    /// Script a non-2xx response with a JSON error body
    pub fn with_error(self, url: &str, status: u16, body: serde_json::Value) -> Self {
        self.script(url, status, None, body)
    }

    fn script(self, url: &str, status: u16, link: Option<&str>, body: serde_json::Value) -> Self {
        self.responses.write().unwrap().insert(
            url.to_string(),
            ScriptedResponse {
                status,
                link: link.map(|l| l.to_string()),
                body,
            },
        );
        self
    }

    /// Every URL requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.read().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, FetchError> {
        self.requested.write().unwrap().push(url.to_string());

        let scripted = self.responses.read().unwrap().get(url).cloned();
        let response = scripted.unwrap_or(ScriptedResponse {
            status: 404,
            link: None,
            body: serde_json::json!({"message": "Not Found"}),
        });

        if (200..=299).contains(&response.status) {
            Ok(JsonResponse {
                link: response.link,
                body: response.body,
            })
        } else {
            Err(FetchError::Http {
                status: response.status,
                status_text: reason(response.status).to_string(),
                body: response.body,
            })
        }
    }
}

fn reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
}

// ============================================================================
// Static Activity Source
// ============================================================================

/// Activity source returning canned events, or a canned upstream failure
pub struct StaticActivitySource {
    source: Source,
    events: Vec<ActivityEvent>,
    failure: Option<u16>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl StaticActivitySource {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            events: Vec::new(),
            failure: None,
            delay: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_events(mut self, events: Vec<ActivityEvent>) -> Self {
        self.events = events;
        self
    }

    /// Fail every call with an upstream error of this status
    pub fn failing(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Identities this source was asked for
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ActivitySource for StaticActivitySource {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch_activity(&self, identity: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        self.calls.write().unwrap().push(identity.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.failure {
            Some(status) => Err(FetchError::Http {
                status,
                status_text: reason(status).to_string(),
                body: serde_json::json!({"message": reason(status)}),
            }),
            None => Ok(self.events.clone()),
        }
    }
}
