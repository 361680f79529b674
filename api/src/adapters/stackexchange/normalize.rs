//! StackExchange timeline normalizer
//!
//! Pure mapping from `TimelineEntry` to the unified activity model. The feed
//! carries no actor identity and no container, so `who` and `where` are
//! always absent.

use chrono::DateTime;

use crate::domain::entities::{
    ActivityEvent, Link, Normalized, QaHostAction, Source, Subject, What,
};

use super::schema::TimelineEntry;

pub fn normalize(entry: &TimelineEntry) -> Normalized {
    let post_type = entry.post_type.as_deref().unwrap_or_default();

    let Some(action) = QaHostAction::from_parts(&entry.timeline_type, post_type) else {
        return Normalized::Unrecognized(format!("{} {}", entry.timeline_type, post_type));
    };

    let Some(when) = DateTime::from_timestamp(entry.creation_date, 0) else {
        return Normalized::Unrecognized(format!(
            "{} (bad creation_date {})",
            action, entry.creation_date
        ));
    };

    // Titles come back HTML-encoded (&#39;, &quot;, ...)
    let title = entry
        .title
        .as_deref()
        .map(|t| html_escape::decode_html_entities(t).into_owned())
        .unwrap_or_default();

    Normalized::Event(ActivityEvent {
        source: Source::QaHost,
        who: None,
        what: What {
            action: action.into(),
            subject: Subject::Single(Link::new(title, entry.link.clone().unwrap_or_default())),
        },
        place: None,
        when,
    })
}
