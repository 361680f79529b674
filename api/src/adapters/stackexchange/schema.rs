//! StackExchange user timeline shapes
//!
//! See https://api.stackexchange.com/docs/types/user-timeline

use serde::Deserialize;

/// One entry of `GET /users/{id}/timeline`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineEntry {
    /// commented, asked, answered, badge, revision, accepted, reviewed, suggested
    pub timeline_type: String,
    /// question or answer; absent on some badge entries
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Unix epoch seconds
    pub creation_date: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub comment_id: Option<i64>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Common response wrapper
///
/// Every field is optional so a page missing one is handled as malformed
/// rather than failing to decode.
#[derive(Debug, Deserialize)]
pub struct TimelinePage {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub has_more: Option<bool>,
    /// Seconds the client must wait before hitting the same method again
    #[serde(default)]
    pub backoff: Option<u64>,
    #[serde(default)]
    pub quota_remaining: Option<i64>,
}
