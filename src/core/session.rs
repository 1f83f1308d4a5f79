//! Form Session
//!
//! Client-side state for the three-field form. Lookups are explicit
//! requests carrying a monotonically increasing sequence number; a response
//! is applied only when it answers the latest issued request, so a slow
//! earlier reply can never overwrite a newer one.

use crate::core::validator::{self, ValidationOutcome};
use crate::models::types::{Locality, LookupResult};

/// A lookup the session has issued. `seq` ties the eventual response back
/// to this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub query_string: String,
    pub state: String,
}

/// State held by one user's form: the three raw inputs, the fetched
/// locality list and the visible single-line status message.
#[derive(Debug, Default)]
pub struct FormSession {
    postcode: String,
    suburb: String,
    state: String,
    localities: Vec<Locality>,
    message: Option<String>,
    /// Sequence number of the most recently issued lookup; 0 = none yet.
    latest_issued: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_postcode(&mut self, value: impl Into<String>) {
        self.postcode = value.into();
    }

    pub fn set_suburb(&mut self, value: impl Into<String>) {
        self.suburb = value.into();
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.state = value.into();
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    pub fn suburb(&self) -> &str {
        &self.suburb
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// The currently held locality list. After a successful validation
    /// this is narrowed to the matching subset.
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }

    /// The visible status message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Issue a new lookup for the current (suburb, state) pair. The
    /// postcode is not part of the query; it is only used locally.
    pub fn begin_lookup(&mut self) -> LookupRequest {
        self.latest_issued += 1;
        LookupRequest {
            seq: self.latest_issued,
            query_string: self.suburb.clone(),
            state: self.state.clone(),
        }
    }

    /// Apply a lookup response. Returns false when the response was
    /// discarded: a stale sequence number (a newer request is outstanding)
    /// or a fetch-time error, which never touches the visible message.
    /// A successful result replaces the held list and clears any prior
    /// message.
    pub fn apply_lookup(&mut self, seq: u64, result: LookupResult) -> bool {
        if self.latest_issued == 0 || seq != self.latest_issued {
            return false;
        }
        match result {
            LookupResult::Localities { localities } => {
                self.localities = localities.locality;
                self.message = None;
                true
            }
            LookupResult::Error { .. } => false,
        }
    }

    /// Validate the current triple against the held list, storing and
    /// returning the status message. On success the held list narrows to
    /// the matching subset.
    pub fn validate(&mut self) -> &str {
        match validator::cross_validate(&self.postcode, &self.suburb, &self.state, &self.localities)
        {
            ValidationOutcome::Valid { matches } => {
                self.localities = matches;
                self.message = Some(validator::MSG_VALID.to_string());
            }
            ValidationOutcome::Mismatch { message, .. } => {
                self.message = Some(message);
            }
        }
        self.message.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::MSG_NO_RESULTS;
    use crate::core::validator::MSG_VALID;

    fn sydney() -> Locality {
        Locality {
            category: "Delivery Area".to_string(),
            id: 4663,
            latitude: -33.8688,
            longitude: 151.2093,
            location: "Sydney".to_string(),
            postcode: 2000,
            state: "NSW".to_string(),
        }
    }

    fn filled_session() -> FormSession {
        let mut session = FormSession::new();
        session.set_postcode("2000");
        session.set_suburb("Sydney");
        session.set_state("NSW");
        session
    }

    #[test]
    fn test_lookup_sequence_is_monotonic() {
        let mut session = filled_session();
        let first = session.begin_lookup();
        let second = session.begin_lookup();
        assert!(second.seq > first.seq);
        assert_eq!(second.query_string, "Sydney");
        assert_eq!(second.state, "NSW");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = filled_session();
        let first = session.begin_lookup();
        let second = session.begin_lookup();

        // The slow first reply arrives after the second request was issued.
        assert!(!session.apply_lookup(first.seq, LookupResult::localities(vec![sydney()])));
        assert!(session.localities().is_empty());

        assert!(session.apply_lookup(second.seq, LookupResult::localities(vec![sydney()])));
        assert_eq!(session.localities().len(), 1);
    }

    #[test]
    fn test_response_without_request_is_discarded() {
        let mut session = filled_session();
        assert!(!session.apply_lookup(0, LookupResult::localities(vec![sydney()])));
        assert!(session.localities().is_empty());
    }

    #[test]
    fn test_fetch_error_leaves_message_untouched() {
        let mut session = filled_session();
        let request = session.begin_lookup();
        session.apply_lookup(request.seq, LookupResult::localities(vec![sydney()]));
        session.set_postcode("9999");
        session.validate();
        let previous = session.message().map(str::to_owned);
        assert!(previous.is_some());

        let request = session.begin_lookup();
        assert!(!session.apply_lookup(request.seq, LookupResult::error(MSG_NO_RESULTS)));
        assert_eq!(session.message().map(str::to_owned), previous);
    }

    #[test]
    fn test_successful_lookup_clears_message() {
        let mut session = filled_session();
        let request = session.begin_lookup();
        session.apply_lookup(request.seq, LookupResult::localities(vec![]));
        session.validate();
        assert!(session.message().is_some());

        let request = session.begin_lookup();
        assert!(session.apply_lookup(request.seq, LookupResult::localities(vec![sydney()])));
        assert!(session.message().is_none());
    }

    #[test]
    fn test_validate_narrows_to_matching_subset() {
        let mut session = filled_session();
        let other = Locality {
            postcode: 2001,
            ..sydney()
        };
        let request = session.begin_lookup();
        session.apply_lookup(request.seq, LookupResult::localities(vec![sydney(), other]));

        assert_eq!(session.validate(), MSG_VALID);
        assert_eq!(session.localities().len(), 1);
        assert_eq!(session.localities()[0].postcode, 2000);
    }
}
