//! GitHub public event shapes
//!
//! See https://docs.github.com/en/rest/using-the-rest-api/github-event-types
//! The `payload` is dispatched on the `type` tag into `EventPayload`; kinds
//! we do not model (and payloads that fail to parse) land in explicit
//! catch-all variants instead of failing the page.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    pub login: String,
    #[serde(default)]
    pub display_login: Option<String>,
}

impl Actor {
    pub fn display_name(&self) -> &str {
        self.display_login
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.login)
    }
}

/// Repository the event happened in; `name` is `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchPayload {
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_true")]
    pub distinct: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePayload {
    #[serde(rename = "ref", default)]
    pub ref_name: Option<String>,
    pub ref_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueRef {
    #[serde(default)]
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    #[serde(default)]
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRef {
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: IssueRef,
    pub comment: CommentRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    pub pull_request: PullRequestRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Forkee {
    pub full_name: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForkPayload {
    pub forkee: Forkee,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuesPayload {
    pub action: String,
    pub issue: IssueRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestReviewCommentPayload {
    pub action: String,
    pub pull_request: PullRequestRef,
    pub comment: CommentRef,
}

/// Event payload, keyed by the event `type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Watch(WatchPayload),
    Push(PushPayload),
    Create(CreatePayload),
    IssueComment(IssueCommentPayload),
    PullRequest(PullRequestPayload),
    Fork(ForkPayload),
    Issues(IssuesPayload),
    PullRequestReviewComment(PullRequestReviewCommentPayload),
    /// A `type` we do not model
    Unknown { kind: String },
    /// A modelled `type` whose payload did not match its shape
    Malformed { kind: String, reason: String },
}

impl EventPayload {
    pub fn parse(kind: &str, payload: serde_json::Value) -> Self {
        match kind {
            "WatchEvent" => typed(kind, payload, EventPayload::Watch),
            "PushEvent" => typed(kind, payload, EventPayload::Push),
            "CreateEvent" => typed(kind, payload, EventPayload::Create),
            "IssueCommentEvent" => typed(kind, payload, EventPayload::IssueComment),
            "PullRequestEvent" => typed(kind, payload, EventPayload::PullRequest),
            "ForkEvent" => typed(kind, payload, EventPayload::Fork),
            // Older clients spelled it without the "s"
            "IssuesEvent" | "IssueEvent" => typed(kind, payload, EventPayload::Issues),
            "PullRequestReviewCommentEvent" => {
                typed(kind, payload, EventPayload::PullRequestReviewComment)
            }
            _ => EventPayload::Unknown {
                kind: kind.to_string(),
            },
        }
    }
}

fn typed<T: DeserializeOwned>(
    kind: &str,
    payload: serde_json::Value,
    wrap: fn(T) -> EventPayload,
) -> EventPayload {
    match serde_json::from_value(payload) {
        Ok(p) => wrap(p),
        Err(e) => EventPayload::Malformed {
            kind: kind.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Wire shape before payload dispatch
#[derive(Deserialize)]
struct EventEnvelope {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    actor: Actor,
    repo: Repo,
    #[serde(default)]
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

/// One entry of `GET /users/{username}/events/public`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "EventEnvelope")]
pub struct GithubEvent {
    pub id: String,
    pub kind: String,
    pub actor: Actor,
    pub repo: Repo,
    pub payload: EventPayload,
    pub created_at: DateTime<Utc>,
}

impl From<EventEnvelope> for GithubEvent {
    fn from(e: EventEnvelope) -> Self {
        let payload = EventPayload::parse(&e.kind, e.payload);
        GithubEvent {
            id: e.id,
            kind: e.kind,
            actor: e.actor,
            repo: e.repo,
            payload,
            created_at: e.created_at,
        }
    }
}
