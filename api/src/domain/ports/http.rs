//! HTTP transport port trait
//!
//! Shared fetch-and-decode seam used by both paginated fetchers.

use async_trait::async_trait;

use crate::error::FetchError;

/// A successful (2xx) response, decoded as JSON
#[derive(Debug, Clone)]
pub struct JsonResponse {
    /// Raw `Link` header, when the upstream sent one
    pub link: Option<String>,
    pub body: serde_json::Value,
}

/// Port trait for issuing GET requests
///
/// Implementations classify the response: 2xx yields a `JsonResponse`,
/// anything else yields `FetchError::Http` with status, status text and
/// the parsed error body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, FetchError>;
}
