//! AusPost Postcode Search Client
//!
//! Transport layer for the one outbound dependency. Owns request building
//! (query parameters + AUTH-KEY header) and decoding of the response shapes
//! the API is known to produce. One call per invocation with no retry and
//! no client-side timeout: a hung upstream call hangs the pending request.
//!
//! API: GET {base}/postcode/search.json?q=<text>&state=<abbrev>

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::models::config::AuspostConfig;
use crate::models::types::LocalityList;

/// Path of the search endpoint under the configured base URL.
const SEARCH_PATH: &str = "/postcode/search.json";
/// Header carrying the API credential.
const AUTH_HEADER: &str = "AUTH-KEY";

/// Decoded body of a search response. Either side may be missing; the
/// resolver decides what each combination means.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// `Some(None)` when the key is present but null — distinct from the
    /// key being absent entirely, which decodes to `None`.
    #[serde(default, deserialize_with = "nullable")]
    pub localities: Option<Option<LocalityList>>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

/// Structured upstream error payload: `{"error": {"errorMessage": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<LocalityList>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LocalityList>::deserialize(deserializer).map(Some)
}

/// Failure talking to the search endpoint.
#[derive(Debug)]
pub enum SearchError {
    /// Upstream answered with a non-success status. Any error payload the
    /// body decoded to is kept so the caller can surface its message.
    Status {
        status: StatusCode,
        error: Option<UpstreamError>,
    },
    /// The request never completed (connect, DNS, TLS, ...).
    Transport(reqwest::Error),
    /// A success status arrived but the body was not valid JSON.
    Decode(reqwest::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status, .. } => write!(f, "search returned status {}", status),
            Self::Transport(err) => write!(f, "search request failed: {}", err),
            Self::Decode(err) => write!(f, "search response decode failed: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Status { .. } => None,
            Self::Transport(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// AusPost postcode search API client.
pub struct AuspostClient {
    client: reqwest::Client,
    base_url: String,
    auth_key: String,
}

impl AuspostClient {
    pub fn new(config: AuspostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_key: config.auth_key,
        }
    }

    /// Search localities matching `query` within `state`. Post boxes are
    /// always excluded, matching the form's semantics.
    pub async fn search(&self, query: &str, state: &str) -> Result<SearchResponse, SearchError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        debug!(query, state, "auspost search");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("state", state), ("excludePostBoxFlag", "true")])
            .header(AUTH_HEADER, &self.auth_key)
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // Keep the error payload when the body parses as one.
            let error = response
                .json::<SearchResponse>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(SearchError::Status { status, error });
        }

        response.json::<SearchResponse>().await.map_err(SearchError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_locality_body() {
        let body: SearchResponse = serde_json::from_value(serde_json::json!({
            "localities": {
                "locality": [
                    {"category": "Delivery Area", "id": 4663, "latitude": -33.8688,
                     "longitude": 151.2093, "location": "Sydney", "postcode": 2000,
                     "state": "NSW"}
                ]
            }
        }))
        .unwrap();

        let list = body.localities.unwrap().unwrap();
        assert_eq!(list.len(), 1);
        assert!(body.error.is_none());
    }

    #[test]
    fn test_null_localities_is_present_but_empty() {
        let body: SearchResponse =
            serde_json::from_value(serde_json::json!({"localities": null})).unwrap();
        assert_eq!(body.localities.map(|inner| inner.is_none()), Some(true));
    }

    #[test]
    fn test_missing_localities_key() {
        let body: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(body.localities.is_none());
        assert!(body.error.is_none());
    }

    #[test]
    fn test_decodes_error_body() {
        let body: SearchResponse = serde_json::from_value(serde_json::json!({
            "error": {"errorMessage": "Please enter a valid API key."}
        }))
        .unwrap();

        assert!(body.localities.is_none());
        assert_eq!(
            body.error.unwrap().error_message,
            "Please enter a valid API key."
        );
    }
}
