//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Raw upstream fixtures come in two flavors: the JSON an upstream would send
//! (for fetcher tests) and the decoded shape (for normalizer tests).

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::adapters::github::schema::GithubEvent;
use crate::adapters::stackexchange::schema::TimelineEntry;
use crate::config::Config;
use crate::domain::entities::{
    ActivityEvent, CodeHostAction, Link, Place, QaHostAction, Source, Subject, What, Who,
};

/// Config pointing both pipelines at unroutable test hosts
pub fn test_config() -> Config {
    Config {
        github_api_url: "https://api.github.test".to_string(),
        github_web_url: "https://github.com".to_string(),
        stackexchange_api_url: "https://api.stackexchange.test/2.2".to_string(),
        ..Config::default()
    }
}

/// A public event as the events endpoint returns it
pub fn github_event_json(kind: &str, payload: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "22249084947",
        "type": kind,
        "actor": {
            "id": 583231,
            "login": "octocat",
            "display_login": "octocat",
            "url": "https://api.github.com/users/octocat"
        },
        "repo": {
            "id": 1296269,
            "name": "octocat/hello",
            "url": "https://api.github.com/repos/octocat/hello"
        },
        "payload": payload,
        "public": true,
        "created_at": "2020-04-17T18:08:49Z"
    })
}

pub fn github_event(kind: &str, payload: serde_json::Value) -> GithubEvent {
    serde_json::from_value(github_event_json(kind, payload)).unwrap()
}

/// A timeline entry as the timeline endpoint returns it
pub fn timeline_entry_json(
    timeline_type: &str,
    post_type: &str,
    creation_date: i64,
) -> serde_json::Value {
    json!({
        "timeline_type": timeline_type,
        "post_type": post_type,
        "title": "How do I borrow twice?",
        "link": "https://stackoverflow.com/q/61279123",
        "creation_date": creation_date,
        "user_id": 7550592,
        "post_id": 61279123
    })
}

pub fn timeline_entry(timeline_type: &str, post_type: &str, creation_date: i64) -> TimelineEntry {
    serde_json::from_value(timeline_entry_json(timeline_type, post_type, creation_date)).unwrap()
}

/// A normalized event at `when`: a starred repository for the code host,
/// an asked question for the Q&A host
pub fn test_event_at(source: Source, when: DateTime<Utc>) -> ActivityEvent {
    match source {
        Source::CodeHost => ActivityEvent {
            source,
            who: Some(Who {
                display_name: "octocat".to_string(),
                profile_url: "https://github.com/octocat".to_string(),
            }),
            what: What {
                action: CodeHostAction::StarredRepository.into(),
                subject: Subject::Single(Link::new(
                    "octocat/hello",
                    "https://github.com/octocat/hello",
                )),
            },
            place: None,
            when,
        },
        Source::QaHost => ActivityEvent {
            source,
            who: None,
            what: What {
                action: QaHostAction::AskedQuestion.into(),
                subject: Subject::Single(Link::new(
                    "How do I borrow twice?",
                    "https://stackoverflow.com/q/61279123",
                )),
            },
            place: None,
            when,
        },
    }
}

/// A push of two commits to `octocat/hello`
pub fn test_push_event(when: DateTime<Utc>) -> ActivityEvent {
    ActivityEvent {
        source: Source::CodeHost,
        who: Some(Who {
            display_name: "octocat".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
        }),
        what: What {
            action: CodeHostAction::PushedCommits.into(),
            subject: Subject::Batch(vec![
                Link::new("Fix typo", "https://github.com/octocat/hello/commit/aaa"),
                Link::new("Add docs", "https://github.com/octocat/hello/commit/bbb"),
            ]),
        },
        place: Some(Place {
            preposition: "to".to_string(),
            display: "octocat/hello".to_string(),
            url: "https://github.com/octocat/hello".to_string(),
        }),
        when,
    }
}
