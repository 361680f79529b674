//! Action labels
//!
//! Closed enumerations of the (verb, noun) pairs each source can produce.
//! Raw verbs are parsed with `FromStr`; anything outside the lists fails,
//! which the normalizers map to "unrecognized".

use serde::{Serialize, Serializer};

/// Verb on a comment (issue comment or pull request review comment)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentVerb {
    Created,
    Edited,
    Deleted,
}

impl CommentVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentVerb::Created => "created",
            CommentVerb::Edited => "edited",
            CommentVerb::Deleted => "deleted",
        }
    }
}

impl std::str::FromStr for CommentVerb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(CommentVerb::Created),
            "edited" => Ok(CommentVerb::Edited),
            "deleted" => Ok(CommentVerb::Deleted),
            _ => Err(format!("Unknown comment action: {}", s)),
        }
    }
}

/// Verb on a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestVerb {
    Assigned,
    Unassigned,
    Labeled,
    Unlabeled,
    Opened,
    Edited,
    Closed,
    Reopened,
    Synchronize,
    ReadyForReview,
    Locked,
    Unlocked,
}

impl PullRequestVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestVerb::Assigned => "assigned",
            PullRequestVerb::Unassigned => "unassigned",
            PullRequestVerb::Labeled => "labeled",
            PullRequestVerb::Unlabeled => "unlabeled",
            PullRequestVerb::Opened => "opened",
            PullRequestVerb::Edited => "edited",
            PullRequestVerb::Closed => "closed",
            PullRequestVerb::Reopened => "reopened",
            PullRequestVerb::Synchronize => "synchronize",
            PullRequestVerb::ReadyForReview => "ready_for_review",
            PullRequestVerb::Locked => "locked",
            PullRequestVerb::Unlocked => "unlocked",
        }
    }
}

impl std::str::FromStr for PullRequestVerb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(PullRequestVerb::Assigned),
            "unassigned" => Ok(PullRequestVerb::Unassigned),
            "labeled" => Ok(PullRequestVerb::Labeled),
            "unlabeled" => Ok(PullRequestVerb::Unlabeled),
            "opened" => Ok(PullRequestVerb::Opened),
            "edited" => Ok(PullRequestVerb::Edited),
            "closed" => Ok(PullRequestVerb::Closed),
            "reopened" => Ok(PullRequestVerb::Reopened),
            "synchronize" => Ok(PullRequestVerb::Synchronize),
            "ready_for_review" => Ok(PullRequestVerb::ReadyForReview),
            "locked" => Ok(PullRequestVerb::Locked),
            "unlocked" => Ok(PullRequestVerb::Unlocked),
            _ => Err(format!("Unknown pull request action: {}", s)),
        }
    }
}

/// Verb on an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueVerb {
    Opened,
    Edited,
    Deleted,
    Pinned,
    Unpinned,
    Closed,
    Reopened,
    Assigned,
    Unassigned,
    Labeled,
    Unlabeled,
    Locked,
    Unlocked,
    Transferred,
    Milestoned,
    Demilestoned,
}

impl IssueVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueVerb::Opened => "opened",
            IssueVerb::Edited => "edited",
            IssueVerb::Deleted => "deleted",
            IssueVerb::Pinned => "pinned",
            IssueVerb::Unpinned => "unpinned",
            IssueVerb::Closed => "closed",
            IssueVerb::Reopened => "reopened",
            IssueVerb::Assigned => "assigned",
            IssueVerb::Unassigned => "unassigned",
            IssueVerb::Labeled => "labeled",
            IssueVerb::Unlabeled => "unlabeled",
            IssueVerb::Locked => "locked",
            IssueVerb::Unlocked => "unlocked",
            IssueVerb::Transferred => "transferred",
            IssueVerb::Milestoned => "milestoned",
            IssueVerb::Demilestoned => "demilestoned",
        }
    }
}

impl std::str::FromStr for IssueVerb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opened" => Ok(IssueVerb::Opened),
            "edited" => Ok(IssueVerb::Edited),
            "deleted" => Ok(IssueVerb::Deleted),
            "pinned" => Ok(IssueVerb::Pinned),
            "unpinned" => Ok(IssueVerb::Unpinned),
            "closed" => Ok(IssueVerb::Closed),
            "reopened" => Ok(IssueVerb::Reopened),
            "assigned" => Ok(IssueVerb::Assigned),
            "unassigned" => Ok(IssueVerb::Unassigned),
            "labeled" => Ok(IssueVerb::Labeled),
            "unlabeled" => Ok(IssueVerb::Unlabeled),
            "locked" => Ok(IssueVerb::Locked),
            "unlocked" => Ok(IssueVerb::Unlocked),
            "transferred" => Ok(IssueVerb::Transferred),
            "milestoned" => Ok(IssueVerb::Milestoned),
            "demilestoned" => Ok(IssueVerb::Demilestoned),
            _ => Err(format!("Unknown issue action: {}", s)),
        }
    }
}

/// Everything a GitHub event can normalize to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeHostAction {
    StarredRepository,
    PushedCommits,
    CreatedBranch,
    CreatedRepository,
    IssueComment(CommentVerb),
    PullRequest(PullRequestVerb),
    ForkedRepository,
    Issue(IssueVerb),
    PullRequestReviewComment(CommentVerb),
}

impl std::fmt::Display for CodeHostAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeHostAction::StarredRepository => write!(f, "starred repository"),
            CodeHostAction::PushedCommits => write!(f, "pushed commits"),
            CodeHostAction::CreatedBranch => write!(f, "created branch"),
            CodeHostAction::CreatedRepository => write!(f, "created repository"),
            CodeHostAction::IssueComment(verb) => write!(f, "{} issue-comment", verb.as_str()),
            CodeHostAction::PullRequest(verb) => write!(f, "{} pull-request", verb.as_str()),
            CodeHostAction::ForkedRepository => write!(f, "forked repository"),
            CodeHostAction::Issue(verb) => write!(f, "{} issue", verb.as_str()),
            CodeHostAction::PullRequestReviewComment(verb) => {
                write!(f, "{} pull-request-review-comment", verb.as_str())
            }
        }
    }
}

/// The StackExchange `timeline_type` x `post_type` pairs we show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaHostAction {
    CommentedQuestion,
    AskedQuestion,
    RevisionQuestion,
    AnsweredAnswer,
    CommentedAnswer,
    RevisionAnswer,
    AcceptedAnswer,
}

impl QaHostAction {
    /// Returns `None` for every pair outside the allow-list
    /// (badges, reviews, suggested edits, unexpected pairings).
    pub fn from_parts(timeline_type: &str, post_type: &str) -> Option<Self> {
        match (timeline_type, post_type) {
            ("commented", "question") => Some(QaHostAction::CommentedQuestion),
            ("asked", "question") => Some(QaHostAction::AskedQuestion),
            ("revision", "question") => Some(QaHostAction::RevisionQuestion),
            ("answered", "answer") => Some(QaHostAction::AnsweredAnswer),
            ("commented", "answer") => Some(QaHostAction::CommentedAnswer),
            ("revision", "answer") => Some(QaHostAction::RevisionAnswer),
            ("accepted", "answer") => Some(QaHostAction::AcceptedAnswer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QaHostAction::CommentedQuestion => "commented question",
            QaHostAction::AskedQuestion => "asked question",
            QaHostAction::RevisionQuestion => "revision question",
            QaHostAction::AnsweredAnswer => "answered answer",
            QaHostAction::CommentedAnswer => "commented answer",
            QaHostAction::RevisionAnswer => "revision answer",
            QaHostAction::AcceptedAnswer => "accepted answer",
        }
    }
}

impl std::fmt::Display for QaHostAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action of an `ActivityEvent`, serialized as its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CodeHost(CodeHostAction),
    QaHost(QaHostAction),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::CodeHost(action) => action.fmt(f),
            Action::QaHost(action) => action.fmt(f),
        }
    }
}

impl From<CodeHostAction> for Action {
    fn from(action: CodeHostAction) -> Self {
        Action::CodeHost(action)
    }
}

impl From<QaHostAction> for Action {
    fn from(action: QaHostAction) -> Self {
        Action::QaHost(action)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_host_labels() {
        assert_eq!(
            CodeHostAction::IssueComment(CommentVerb::Created).to_string(),
            "created issue-comment"
        );
        assert_eq!(
            CodeHostAction::PullRequest(PullRequestVerb::ReadyForReview).to_string(),
            "ready_for_review pull-request"
        );
        assert_eq!(
            CodeHostAction::PullRequestReviewComment(CommentVerb::Deleted).to_string(),
            "deleted pull-request-review-comment"
        );
        assert_eq!(
            CodeHostAction::Issue(IssueVerb::Closed).to_string(),
            "closed issue"
        );
    }

    #[test]
    fn verbs_round_trip_through_from_str() {
        for verb in ["created", "edited", "deleted"] {
            assert_eq!(verb.parse::<CommentVerb>().unwrap().as_str(), verb);
        }
        assert!("started".parse::<CommentVerb>().is_err());
        assert!("merged".parse::<PullRequestVerb>().is_err());
        assert_eq!(
            "demilestoned".parse::<IssueVerb>().unwrap(),
            IssueVerb::Demilestoned
        );
    }

    #[test]
    fn qa_host_allow_list_has_seven_pairs() {
        let timeline_types = [
            "commented",
            "asked",
            "answered",
            "badge",
            "revision",
            "accepted",
            "reviewed",
            "suggested",
        ];
        let post_types = ["question", "answer"];

        let recognized: Vec<String> = timeline_types
            .iter()
            .flat_map(|t| post_types.iter().map(move |p| (*t, *p)))
            .filter_map(|(t, p)| QaHostAction::from_parts(t, p))
            .map(|a| a.to_string())
            .collect();

        assert_eq!(recognized.len(), 7);
        assert!(recognized.contains(&"answered answer".to_string()));
        assert!(!recognized.contains(&"asked answer".to_string()));
        assert!(QaHostAction::from_parts("badge", "question").is_none());
        assert!(QaHostAction::from_parts("reviewed", "answer").is_none());
    }

    #[test]
    fn action_serializes_as_label() {
        let action = Action::from(CodeHostAction::StarredRepository);
        assert_eq!(
            serde_json::to_value(action).unwrap(),
            serde_json::json!("starred repository")
        );
    }
}
