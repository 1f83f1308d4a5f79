//! Data Model - Localities & Lookup Results
//!
//! Wire-shape types shared by the AusPost provider, the resolver and the
//! HTTP surface. `LookupResult` is the tagged union of the client contract:
//! a lookup answer is either a locality list or an error message, never both.

use serde::{Deserialize, Deserializer, Serialize};

/// One candidate address record returned by the postcode search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    /// Record category, e.g. "Delivery Area"
    #[serde(default)]
    pub category: String,
    /// Upstream identifier (uniqueness not guaranteed across calls)
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Suburb/town name
    #[serde(default)]
    pub location: String,
    /// 4-digit Australian postcode
    #[serde(default)]
    pub postcode: u32,
    /// State/territory abbreviation, e.g. "NSW"
    #[serde(default)]
    pub state: String,
}

/// Envelope the search API nests locality records in: `{"locality": [...]}`.
///
/// A single match comes back as a bare object instead of a one-element
/// array, so decoding accepts both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalityList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub locality: Vec<Locality>,
}

impl LocalityList {
    pub fn new(locality: Vec<Locality>) -> Self {
        Self { locality }
    }

    pub fn len(&self) -> usize {
        self.locality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locality.is_empty()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Locality>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Locality>),
        One(Box<Locality>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(single) => vec![*single],
    })
}

/// Discriminated outcome of a lookup: localities or an error message.
///
/// Serialized untagged, so the wire carries exactly one of
/// `{"localities": {"locality": [...]}}` or `{"errorMessage": "..."}`.
/// The "never both set" invariant holds structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult {
    Localities {
        localities: LocalityList,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl LookupResult {
    /// Success result wrapping a list of candidate localities.
    pub fn localities(list: Vec<Locality>) -> Self {
        Self::Localities {
            localities: LocalityList::new(list),
        }
    }

    /// Value-level error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error_message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
