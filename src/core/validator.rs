//! Three-Stage Cross-Validation
//!
//! Checks a (postcode, suburb, state) triple against a fetched locality
//! list, in strict order with short-circuit on the first failure:
//! 1. postcode matches suburb
//! 2. suburb exists in state
//! 3. one locality satisfies all three predicates at once

use serde::Serialize;

use crate::models::types::Locality;

/// Success message (wording fixed by the form contract).
pub const MSG_VALID: &str = "The postcode, suburb, and state input are valid.";
/// Stage-3 combined mismatch: stages 1 and 2 passed via different
/// localities but no single record satisfies all three predicates.
pub const MSG_COMBINED_MISMATCH: &str =
    "The postcode, suburb, and state do not match the same locality.";

/// Which check rejected the triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchStage {
    PostcodeSuburb,
    SuburbState,
    Combined,
}

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// All three inputs are consistent; carries the matching subset.
    Valid { matches: Vec<Locality> },
    /// One of the checks failed; carries the stage and its message.
    Mismatch {
        stage: MismatchStage,
        message: String,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The single-line status message for display.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid { .. } => MSG_VALID,
            Self::Mismatch { message, .. } => message,
        }
    }
}

/// Run the three checks over `localities`.
///
/// Suburb matching is case-insensitive substring containment against the
/// locality's location text; state comparison uppercases the input before
/// an exact match; the postcode is compared numerically, so an
/// unparseable postcode input never matches (the form coerces text to a
/// number the same way).
pub fn cross_validate(
    postcode: &str,
    suburb: &str,
    state: &str,
    localities: &[Locality],
) -> ValidationOutcome {
    let suburb_lower = suburb.to_lowercase();
    let state_upper = state.to_uppercase();
    let postcode_num: Option<u32> = postcode.trim().parse().ok();

    let suburb_matches = |l: &Locality| l.location.to_lowercase().contains(&suburb_lower);
    let postcode_matches = |l: &Locality| postcode_num == Some(l.postcode);
    let state_matches = |l: &Locality| l.state == state_upper;

    if !localities
        .iter()
        .any(|l| suburb_matches(l) && postcode_matches(l))
    {
        return ValidationOutcome::Mismatch {
            stage: MismatchStage::PostcodeSuburb,
            message: format!(
                "The postcode {} does not match the suburb {}.",
                postcode,
                suburb.to_uppercase()
            ),
        };
    }

    if !localities
        .iter()
        .any(|l| suburb_matches(l) && state_matches(l))
    {
        return ValidationOutcome::Mismatch {
            stage: MismatchStage::SuburbState,
            message: format!(
                "The suburb {} does not exist in the state {}.",
                suburb, state
            ),
        };
    }

    let matches: Vec<Locality> = localities
        .iter()
        .filter(|l| suburb_matches(l) && state_matches(l) && postcode_matches(l))
        .cloned()
        .collect();

    if matches.is_empty() {
        // Stages 1 and 2 each passed through different records.
        return ValidationOutcome::Mismatch {
            stage: MismatchStage::Combined,
            message: MSG_COMBINED_MISMATCH.to_string(),
        };
    }

    ValidationOutcome::Valid { matches }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locality(location: &str, postcode: u32, state: &str) -> Locality {
        Locality {
            category: "Delivery Area".to_string(),
            id: 0,
            latitude: 0.0,
            longitude: 0.0,
            location: location.to_string(),
            postcode,
            state: state.to_string(),
        }
    }

    fn sydney_only() -> Vec<Locality> {
        vec![locality("Sydney", 2000, "NSW")]
    }

    #[test]
    fn test_valid_triple() {
        let outcome = cross_validate("2000", "Sydney", "NSW", &sydney_only());
        assert!(outcome.is_valid());
        assert_eq!(outcome.message(), MSG_VALID);
        match outcome {
            ValidationOutcome::Valid { matches } => {
                assert_eq!(matches, sydney_only());
            }
            ValidationOutcome::Mismatch { message, .. } => panic!("unexpected: {message}"),
        }
    }

    #[test]
    fn test_wrong_postcode_fails_stage_one() {
        let outcome = cross_validate("9999", "Sydney", "NSW", &sydney_only());
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatch {
                stage: MismatchStage::PostcodeSuburb,
                message: "The postcode 9999 does not match the suburb SYDNEY.".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_state_fails_stage_two() {
        // Stage 1 passes (postcode 2000 matches a Sydney entry), stage 2
        // rejects the state.
        let outcome = cross_validate("2000", "Sydney", "VIC", &sydney_only());
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatch {
                stage: MismatchStage::SuburbState,
                message: "The suburb Sydney does not exist in the state VIC.".to_string(),
            }
        );
    }

    #[test]
    fn test_suburb_match_is_case_insensitive_substring() {
        let outcome = cross_validate("2000", "sydney", "NSW", &sydney_only());
        assert!(outcome.is_valid());

        // Substring: "Sydney South" contains "sydney".
        let outcome = cross_validate(
            "2004",
            "sydney",
            "NSW",
            &[locality("Sydney South", 2004, "NSW")],
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_state_input_is_uppercased() {
        let outcome = cross_validate("2000", "Sydney", "nsw", &sydney_only());
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_unparseable_postcode_never_matches() {
        let outcome = cross_validate("20a0", "Sydney", "NSW", &sydney_only());
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatch {
                stage: MismatchStage::PostcodeSuburb,
                message: "The postcode 20a0 does not match the suburb SYDNEY.".to_string(),
            }
        );
    }

    #[test]
    fn test_combined_mismatch_when_no_single_record_satisfies_all() {
        // Stage 1 passes via the QLD entry (postcode), stage 2 via the NSW
        // entry (state), but no record has both.
        let localities = vec![
            locality("Springfield", 4300, "QLD"),
            locality("Springfield", 2250, "NSW"),
        ];
        let outcome = cross_validate("4300", "Springfield", "NSW", &localities);
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatch {
                stage: MismatchStage::Combined,
                message: MSG_COMBINED_MISMATCH.to_string(),
            }
        );
    }

    #[test]
    fn test_valid_keeps_only_fully_matching_subset() {
        let localities = vec![
            locality("Springfield", 4300, "QLD"),
            locality("Springfield Lakes", 4300, "QLD"),
            locality("Springfield", 2250, "NSW"),
        ];
        let outcome = cross_validate("4300", "Springfield", "QLD", &localities);
        match outcome {
            ValidationOutcome::Valid { matches } => {
                assert_eq!(matches.len(), 2);
                assert!(matches.iter().all(|l| l.state == "QLD"));
            }
            ValidationOutcome::Mismatch { message, .. } => panic!("unexpected: {message}"),
        }
    }

    #[test]
    fn test_empty_list_fails_stage_one() {
        let outcome = cross_validate("2000", "Sydney", "NSW", &[]);
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatch {
                stage: MismatchStage::PostcodeSuburb,
                message: "The postcode 2000 does not match the suburb SYDNEY.".to_string(),
            }
        );
    }
}
