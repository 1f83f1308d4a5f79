//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::types::Locality;

/// Envelope for the operational endpoints (health, stats). The lookup
/// operation itself returns the bare `LookupResult` union instead — that
/// wire shape is the client contract.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

// ============================================
// Postcode Lookup (validatePostcode)
// ============================================

/// Body of the lookup operation. Fields default to empty so the resolver's
/// missing-input message handles absence uniformly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePostcodeRequest {
    #[serde(default)]
    pub query_string: String,
    #[serde(default)]
    pub state: String,
}

// ============================================
// Address Check
// ============================================

/// Body of the combined address check: one lookup plus the three-stage
/// cross-validation in a single round trip.
#[derive(Debug, Deserialize)]
pub struct AddressCheckRequest {
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct AddressCheckData {
    pub valid: bool,
    /// Single-line status message, exactly as the form displays it.
    pub message: String,
    /// Localities satisfying all three checks (empty unless valid).
    pub matches: Vec<Locality>,
}

// ============================================
// Stats / Health
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub lookups_total: u64,
    pub lookup_errors: u64,
    pub checks_total: u64,
    pub checks_valid: u64,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
