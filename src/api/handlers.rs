//! API Request Handlers

use axum::extract::{Json, State};
use std::sync::Arc;
use std::time::Instant;

use super::types::*;
use crate::core::resolver::LookupResolver;
use crate::core::validator::{self, ValidationOutcome};
use crate::models::types::LookupResult;
use crate::telemetry::TelemetryCollector;

/// Shared application state. Built exactly once in `main`, before the
/// listener binds, so no request ever races resolver initialization; the
/// resolver inside is reused for every request.
pub struct AppState {
    pub resolver: Arc<LookupResolver>,
    pub telemetry: Arc<TelemetryCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: LookupResolver, telemetry: Arc<TelemetryCollector>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Postcode Lookup (validatePostcode)
// ============================================

/// Resolve a (queryString, state) pair into the locality union. Always
/// HTTP 200 carrying a well-formed union value — failures are value-level
/// error messages, never faults.
pub async fn validate_postcode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidatePostcodeRequest>,
) -> Json<LookupResult> {
    let start = Instant::now();

    let result = state.resolver.resolve(&req.query_string, &req.state).await;

    state
        .telemetry
        .record_lookup(start.elapsed().as_millis() as u64, result.is_error());

    Json(result)
}

// ============================================
// Address Check
// ============================================

/// One lookup plus the three-stage cross-validation in a single round
/// trip: the whole form flow for clients that do not hold local state.
pub async fn check_address(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddressCheckRequest>,
) -> Json<AddressCheckData> {
    let start = Instant::now();

    let lookup = state.resolver.resolve(&req.suburb, &req.state).await;
    state
        .telemetry
        .record_lookup(start.elapsed().as_millis() as u64, lookup.is_error());

    let data = match lookup {
        // Unlike the stateful form, a single round trip has no previously
        // fetched list to fall back on, so the lookup error is the answer.
        LookupResult::Error { error_message } => AddressCheckData {
            valid: false,
            message: error_message,
            matches: Vec::new(),
        },
        LookupResult::Localities { localities } => {
            match validator::cross_validate(
                &req.postcode,
                &req.suburb,
                &req.state,
                &localities.locality,
            ) {
                ValidationOutcome::Valid { matches } => AddressCheckData {
                    valid: true,
                    message: validator::MSG_VALID.to_string(),
                    matches,
                },
                ValidationOutcome::Mismatch { message, .. } => AddressCheckData {
                    valid: false,
                    message,
                    matches: Vec::new(),
                },
            }
        }
    };

    state.telemetry.record_check(data.valid);

    Json(data)
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();

    let data = StatsData {
        lookups_total: stats.lookups_total,
        lookup_errors: stats.lookup_errors,
        checks_total: stats.checks_total,
        checks_valid: stats.checks_valid,
        avg_latency_ms: stats.avg_latency_ms,
        uptime_seconds: state.uptime_seconds(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
