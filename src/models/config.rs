//! Service Configuration
//!
//! All runtime settings come from the environment. The AusPost credential
//! is required: there is no default and never a literal in source.

use crate::models::errors::AppError;

/// Production endpoint of the AusPost postcode search API.
pub const DEFAULT_AUSPOST_BASE_URL: &str = "https://digitalapi.auspost.com.au";

/// Settings for the outbound postcode search dependency.
#[derive(Debug, Clone)]
pub struct AuspostConfig {
    /// Base URL of the search API (overridable for tests/staging)
    pub base_url: String,
    /// Static credential sent as the AUTH-KEY header
    pub auth_key: String,
}

impl AuspostConfig {
    pub fn new(base_url: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_key: auth_key.into(),
        }
    }

    /// Read from the environment. Fails when AUSPOST_AUTH_KEY is unset or
    /// blank.
    pub fn from_env() -> Result<Self, AppError> {
        let auth_key = std::env::var("AUSPOST_AUTH_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::missing_api_key("AUSPOST_AUTH_KEY"))?;

        let base_url = std::env::var("AUSPOST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_AUSPOST_BASE_URL.to_string());

        Ok(Self { base_url, auth_key })
    }
}

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Outbound AusPost settings
    pub auspost: AuspostConfig,
}

impl AppConfig {
    /// Read from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("POSTCHECK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        // Railway-style PORT first, POSTCHECK_PORT for local runs
        let port: u16 = std::env::var("PORT")
            .or_else(|_| std::env::var("POSTCHECK_PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Ok(Self {
            host,
            port,
            auspost: AuspostConfig::from_env()?,
        })
    }
}
