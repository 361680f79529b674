//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use reqwest::Client;

use crate::domain::ports::{HttpTransport, JsonResponse};
use crate::error::FetchError;

/// Implementation of the transport port over a shared reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, FetchError> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let text = response.text().await?;

        classify(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            link,
            &text,
        )
    }
}

/// Turn a raw response into success or `FetchError::Http`
pub(crate) fn classify(
    status: u16,
    status_text: &str,
    link: Option<String>,
    text: &str,
) -> Result<JsonResponse, FetchError> {
    if (200..=299).contains(&status) {
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text).map_err(|e| FetchError::Decode(e.to_string()))?
        };
        Ok(JsonResponse { link, body })
    } else {
        Err(FetchError::Http {
            status,
            status_text: status_text.to_string(),
            body: parse_error_body(text),
        })
    }
}

/// Error bodies are usually JSON; keep the text when they are not
fn parse_error_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_decodes_body_and_keeps_link() {
        let response = classify(
            200,
            "OK",
            Some("<https://api.example/next>; rel=\"next\"".to_string()),
            r#"[{"id": "1"}]"#,
        )
        .unwrap();

        assert!(response.link.is_some());
        assert_eq!(response.body[0]["id"], "1");
    }

    #[test]
    fn empty_success_body_is_null() {
        let response = classify(204, "No Content", None, "").unwrap();
        assert!(response.body.is_null());
    }

    #[test]
    fn success_with_non_json_body_is_decode_error() {
        let err = classify(200, "OK", None, "<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn failure_carries_status_text_and_parsed_body() {
        let err = classify(404, "Not Found", None, r#"{"message": "Not Found"}"#).unwrap_err();

        match err {
            FetchError::Http {
                status,
                status_text,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
                assert_eq!(body["message"], "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_with_text_body_keeps_text() {
        let err = classify(502, "Bad Gateway", None, "upstream down").unwrap_err();

        match err {
            FetchError::Http { body, .. } => {
                assert_eq!(body, serde_json::Value::String("upstream down".to_string()))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
