//! Providers Module - External Data Sources
//!
//! The one outbound dependency lives here: the AusPost postcode search
//! client.

pub mod auspost;

pub use auspost::*;
