//! Feed renderer
//!
//! Renders the merged activity feed to plain markdown for clients that do
//! not ask for JSON.

use chrono::SecondsFormat;

use crate::domain::entities::{ActivityEvent, Link, Subject};

/// Render a feed to markdown format, one block per event in feed order
pub fn render_activity(events: &[ActivityEvent]) -> String {
    let mut buf = String::new();

    buf.push_str("# Developer Activity\n\n");

    if events.is_empty() {
        buf.push_str("_No activity found._\n");
        return buf;
    }

    for event in events {
        buf.push_str(&render_event(event));
        buf.push('\n');
    }

    buf.push_str(&format!("---\n{} events\n", events.len()));

    buf
}

fn render_event(event: &ActivityEvent) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("## {}\n", event.what.action));
    buf.push_str(&format!(
        "- When: {}\n",
        event.when.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    buf.push_str(&format!("- Source: {}\n", event.source));

    if let Some(who) = &event.who {
        buf.push_str(&format!("- Who: {} ({})\n", who.display_name, who.profile_url));
    }

    match &event.what.subject {
        Subject::Single(link) => {
            buf.push_str(&format!("- What: {}\n", render_link(link)));
        }
        Subject::Batch(links) => {
            buf.push_str("- What:\n");
            if links.is_empty() {
                buf.push_str("  - _no commits_\n");
            }
            for link in links {
                buf.push_str(&format!("  - {}\n", render_link(link)));
            }
        }
    }

    if let Some(place) = &event.place {
        buf.push_str(&format!(
            "- Where: {} {} ({})\n",
            place.preposition, place.display, place.url
        ));
    }

    buf
}

fn render_link(link: &Link) -> String {
    match (link.display.is_empty(), link.url.is_empty()) {
        (_, true) => link.display.clone(),
        (true, false) => link.url.clone(),
        (false, false) => format!("{} ({})", link.display, link.url),
    }
}
