//! Activity handlers
//!
//! Endpoint for the merged developer activity feed.
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::Identities;
use crate::domain::entities::ActivityEvent;
use crate::domain::ports::ActivitySource;
use crate::error::AppError;
use crate::feed::render_activity;
use crate::AppState;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Query for GET /activity
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    /// GitHub username
    pub github: Option<String>,
    /// StackOverflow numeric user id
    pub stackoverflow: Option<String>,
}

impl ActivityQuery {
    fn into_identities(self) -> Result<Identities, AppError> {
        let identities = Identities::new(self.github, self.stackoverflow);

        if let Some(id) = &identities.qa_host {
            if !id.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::BadRequest(format!(
                    "stackoverflow must be a numeric user id, got '{}'",
                    id
                )));
            }
        }

        Ok(identities)
    }
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub events: Vec<ActivityEvent>,
    pub count: usize,
}

/// GET /activity?github=<username>&stackoverflow=<user id>
///
/// Returns the merged feed, most recent first. Omitted identities are
/// skipped; with none at all the feed is simply empty.
/// - Accept: application/json → JSON response
/// - Otherwise → Plain text
pub async fn get_activity<CH, QA>(
    State(state): State<AppState<CH, QA>>,
    Query(query): Query<ActivityQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    CH: ActivitySource + 'static,
    QA: ActivitySource + 'static,
{
    let identities = query.into_identities()?;
    let events = state.aggregator.aggregate(&identities).await?;

    if wants_json(&headers) {
        let count = events.len();
        Ok(Json(ActivityResponse { events, count }).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_activity(&events),
        )
            .into_response())
    }
}
