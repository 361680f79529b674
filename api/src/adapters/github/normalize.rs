//! GitHub event normalizer
//!
//! Pure mapping from `GithubEvent` to the unified activity model. No I/O.

use crate::domain::entities::{
    ActivityEvent, CodeHostAction, Link, Normalized, Place, Source, Subject, What, Who,
};

use super::schema::{EventPayload, GithubEvent};

/// Normalize one event. `web_url` is the GitHub web base (e.g. `https://github.com`)
/// used to template profile, repository, tree and commit links.
pub fn normalize(event: &GithubEvent, web_url: &str) -> Normalized {
    let web_url = web_url.trim_end_matches('/');
    let repo_name = event.repo.name.as_str();
    let repo_link = Link::new(repo_name, format!("{}/{}", web_url, repo_name));

    let (action, subject, place) = match &event.payload {
        EventPayload::Watch(_) => (
            CodeHostAction::StarredRepository,
            Subject::Single(repo_link),
            None,
        ),
        EventPayload::Push(payload) => {
            let commits = payload
                .commits
                .iter()
                .filter(|c| c.distinct)
                .map(|c| {
                    Link::new(
                        first_line(&c.message),
                        format!("{}/{}/commit/{}", web_url, repo_name, c.sha),
                    )
                })
                .collect();
            (
                CodeHostAction::PushedCommits,
                Subject::Batch(commits),
                Some(located("to", repo_link)),
            )
        }
        EventPayload::Create(payload) => match (payload.ref_type.as_str(), &payload.ref_name) {
            ("branch", Some(branch)) => (
                CodeHostAction::CreatedBranch,
                Subject::Single(Link::new(
                    branch.as_str(),
                    format!("{}/{}/tree/{}", web_url, repo_name, branch),
                )),
                Some(located("in", repo_link)),
            ),
            ("repository", _) => (
                CodeHostAction::CreatedRepository,
                Subject::Single(repo_link),
                None,
            ),
            (ref_type, _) => {
                return Normalized::Unrecognized(format!("CreateEvent({})", ref_type));
            }
        },
        EventPayload::IssueComment(payload) => {
            let Ok(verb) = payload.action.parse() else {
                return unrecognized_verb(event, &payload.action);
            };
            (
                CodeHostAction::IssueComment(verb),
                Subject::Single(Link::new(
                    payload.issue.title.as_str(),
                    payload.comment.html_url.as_str(),
                )),
                Some(located("in", repo_link)),
            )
        }
        EventPayload::PullRequest(payload) => {
            let Ok(verb) = payload.action.parse() else {
                return unrecognized_verb(event, &payload.action);
            };
            (
                CodeHostAction::PullRequest(verb),
                Subject::Single(Link::new(
                    payload.pull_request.title.as_str(),
                    payload.pull_request.html_url.as_str(),
                )),
                Some(located("in", repo_link)),
            )
        }
        EventPayload::Fork(payload) => (
            CodeHostAction::ForkedRepository,
            Subject::Single(repo_link),
            Some(located(
                "into",
                Link::new(
                    payload.forkee.full_name.as_str(),
                    payload.forkee.html_url.as_str(),
                ),
            )),
        ),
        EventPayload::Issues(payload) => {
            let Ok(verb) = payload.action.parse() else {
                return unrecognized_verb(event, &payload.action);
            };
            (
                CodeHostAction::Issue(verb),
                Subject::Single(Link::new(
                    payload.issue.title.as_str(),
                    payload.issue.html_url.as_str(),
                )),
                Some(located("in", repo_link)),
            )
        }
        EventPayload::PullRequestReviewComment(payload) => {
            let Ok(verb) = payload.action.parse() else {
                return unrecognized_verb(event, &payload.action);
            };
            (
                CodeHostAction::PullRequestReviewComment(verb),
                Subject::Single(Link::new(
                    payload.pull_request.title.as_str(),
                    payload.comment.html_url.as_str(),
                )),
                Some(located("in", repo_link)),
            )
        }
        EventPayload::Unknown { kind } => return Normalized::Unrecognized(kind.clone()),
        EventPayload::Malformed { kind, reason } => {
            return Normalized::Unrecognized(format!("{} (malformed: {})", kind, reason));
        }
    };

    Normalized::Event(ActivityEvent {
        source: Source::CodeHost,
        who: Some(Who {
            display_name: event.actor.display_name().to_string(),
            profile_url: format!("{}/{}", web_url, event.actor.login),
        }),
        what: What {
            action: action.into(),
            subject,
        },
        place,
        when: event.created_at,
    })
}

fn located(preposition: &str, link: Link) -> Place {
    Place {
        preposition: preposition.to_string(),
        display: link.display,
        url: link.url,
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

fn unrecognized_verb(event: &GithubEvent, verb: &str) -> Normalized {
    Normalized::Unrecognized(format!("{}({})", event.kind, verb))
}
