//! Postcheck Library
//!
//! Australian address validation backed by the AusPost postcode search
//! API:
//! - Lookup resolver wrapping the one outbound call per request
//! - Three-stage local cross-validation of (postcode, suburb, state)
//! - Form session state with ordered lookup sequencing

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod telemetry;

pub use crate::core::resolver::LookupResolver;
pub use crate::core::session::{FormSession, LookupRequest};
pub use crate::core::validator::{cross_validate, MismatchStage, ValidationOutcome};
pub use crate::models::config::{AppConfig, AuspostConfig};
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{Locality, LocalityList, LookupResult};
pub use crate::providers::auspost::AuspostClient;
pub use crate::telemetry::{TelemetryCollector, TelemetryStats};
