//! Activity event domain entity
//!
//! The unified "who did what, where, when" record both sources normalize to.
//! Created by a normalizer, never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::Action;

/// Which external service an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    #[serde(rename = "github")]
    CodeHost,
    #[serde(rename = "stackoverflow")]
    QaHost,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::CodeHost => write!(f, "github"),
            Source::QaHost => write!(f, "stackoverflow"),
        }
    }
}

/// Actor identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Who {
    pub display_name: String,
    pub profile_url: String,
}

/// A label and the URL it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub display: String,
    pub url: String,
}

impl Link {
    pub fn new(display: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            url: url.into(),
        }
    }
}

/// Primary subject of an action
///
/// Multi-target actions (a push of several commits) carry a batch; it
/// serializes to index-aligned `subject_display` / `subject_url` arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Single(Link),
    Batch(Vec<Link>),
}

impl Subject {
    pub fn displays(&self) -> Vec<&str> {
        match self {
            Subject::Single(link) => vec![link.display.as_str()],
            Subject::Batch(links) => links.iter().map(|l| l.display.as_str()).collect(),
        }
    }

    pub fn urls(&self) -> Vec<&str> {
        match self {
            Subject::Single(link) => vec![link.url.as_str()],
            Subject::Batch(links) => links.iter().map(|l| l.url.as_str()).collect(),
        }
    }
}

/// What was done
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct What {
    pub action: Action,
    pub subject: Subject,
}

impl Serialize for What {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("What", 3)?;
        state.serialize_field("action", &self.action)?;
        match &self.subject {
            Subject::Single(link) => {
                state.serialize_field("subject_display", &link.display)?;
                state.serialize_field("subject_url", &link.url)?;
            }
            Subject::Batch(_) => {
                state.serialize_field("subject_display", &self.subject.displays())?;
                state.serialize_field("subject_url", &self.subject.urls())?;
            }
        }
        state.end()
    }
}

/// Where the action happened (e.g. a repository)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub preposition: String,
    pub display: String,
    pub url: String,
}

/// One entry of the unified feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEvent {
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who: Option<Who>,
    pub what: What,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    pub when: DateTime<Utc>,
}

/// Result of normalizing one raw upstream record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Event(ActivityEvent),
    /// The record does not map to any supported action; dropped, never an error.
    /// Carries a short description of what was seen, for logging.
    Unrecognized(String),
}

impl Normalized {
    pub fn into_event(self) -> Option<ActivityEvent> {
        match self {
            Normalized::Event(event) => Some(event),
            Normalized::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CodeHostAction, QaHostAction};
    use chrono::TimeZone;

    #[test]
    fn batch_subject_serializes_as_parallel_arrays() {
        let what = What {
            action: CodeHostAction::PushedCommits.into(),
            subject: Subject::Batch(vec![
                Link::new("first", "https://example.com/1"),
                Link::new("second", "https://example.com/2"),
            ]),
        };

        let json = serde_json::to_value(&what).unwrap();

        assert_eq!(json["action"], "pushed commits");
        assert_eq!(json["subject_display"], serde_json::json!(["first", "second"]));
        assert_eq!(
            json["subject_url"],
            serde_json::json!(["https://example.com/1", "https://example.com/2"])
        );
    }

    #[test]
    fn event_without_who_or_where_omits_them() {
        let event = ActivityEvent {
            source: Source::QaHost,
            who: None,
            what: What {
                action: QaHostAction::AskedQuestion.into(),
                subject: Subject::Single(Link::new("How?", "https://so.example/q/1")),
            },
            place: None,
            when: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["source"], "stackoverflow");
        assert!(json.get("who").is_none());
        assert!(json.get("where").is_none());
        assert_eq!(json["what"]["subject_display"], "How?");
    }

    #[test]
    fn into_event_drops_unrecognized() {
        assert!(Normalized::Unrecognized("GollumEvent".to_string())
            .into_event()
            .is_none());
    }
}
