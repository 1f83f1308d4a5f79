//! Lookup Resolver
//!
//! Translates a (query string, state) pair into a `LookupResult` by
//! delegating to the AusPost client. Every failure is downgraded to a
//! value-level error message: callers always receive a well-formed union,
//! never a fault.

use tracing::warn;

use crate::models::config::AuspostConfig;
use crate::models::types::LookupResult;
use crate::providers::auspost::{AuspostClient, SearchError, SearchResponse};

/// Message when either required input is blank; no outbound call is made.
pub const MSG_MISSING_INPUT: &str = "Please enter Suburb, state, or Postcode.";
/// Message when the search matched nothing.
pub const MSG_NO_RESULTS: &str = "No results found.";
/// Fallback when the upstream error payload carries no message.
pub const MSG_VALIDATION_ERROR: &str = "An error occurred while validating the address.";
/// Generic fallback for transport failures and unrecognized responses.
pub const MSG_PROCESSING_ERROR: &str = "An error occurred while processing the request.";

/// Resolver around the shared AusPost client. Built once per process
/// before the listener binds and reused for every request; the reqwest
/// client inside keeps its connection pool for the process lifetime.
pub struct LookupResolver {
    auspost: AuspostClient,
}

impl LookupResolver {
    pub fn new(config: AuspostConfig) -> Self {
        Self {
            auspost: AuspostClient::new(config),
        }
    }

    /// Resolve a lookup. Makes exactly one outbound call, or none when an
    /// input is blank.
    pub async fn resolve(&self, query_string: &str, state: &str) -> LookupResult {
        if query_string.trim().is_empty() || state.trim().is_empty() {
            return LookupResult::error(MSG_MISSING_INPUT);
        }

        match self.auspost.search(query_string, state).await {
            Ok(body) => map_response(body),
            Err(SearchError::Status { status, error }) => {
                warn!(%status, "auspost returned error status");
                match error {
                    Some(err) if !err.error_message.is_empty() => {
                        LookupResult::error(err.error_message)
                    }
                    _ => LookupResult::error(MSG_PROCESSING_ERROR),
                }
            }
            Err(err) => {
                warn!(error = %err, "auspost lookup failed");
                LookupResult::error(MSG_PROCESSING_ERROR)
            }
        }
    }
}

/// Map a decoded success body onto the union. Order matters: a present
/// `localities` key wins over an `error` payload.
fn map_response(body: SearchResponse) -> LookupResult {
    match (body.localities, body.error) {
        // Key present with a value; the list may still be empty.
        (Some(Some(list)), _) => LookupResult::Localities { localities: list },
        // Key present but null.
        (Some(None), _) => LookupResult::error(MSG_NO_RESULTS),
        (None, Some(err)) if !err.error_message.is_empty() => {
            LookupResult::error(err.error_message)
        }
        (None, Some(_)) => LookupResult::error(MSG_VALIDATION_ERROR),
        (None, None) => LookupResult::error(MSG_PROCESSING_ERROR),
    }
}
