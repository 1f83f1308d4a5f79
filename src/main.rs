//! Postcheck API Server
//!
//! HTTP front end for Australian postcode validation
//!
//! Usage:
//!   cargo run --bin postcheck_api
//!
//! Environment:
//!   AUSPOST_AUTH_KEY      - AusPost API credential (required)
//!   AUSPOST_BASE_URL      - Override the search endpoint (tests/staging)
//!   POSTCHECK_HOST        - Server host (default: 0.0.0.0)
//!   PORT / POSTCHECK_PORT - Server port (default: 8080)
//!   RUST_LOG              - Log level (default: info)

use postcheck::api::{create_router, handlers::AppState};
use postcheck::models::config::AppConfig;
use postcheck::telemetry::TelemetryCollector;
use postcheck::LookupResolver;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = AppConfig::from_env()?;

    // One resolver for the process lifetime, built before the listener
    // binds so no request ever races initialization.
    let resolver = LookupResolver::new(config.auspost.clone());

    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    let state = Arc::new(AppState::new(resolver, telemetry));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🚀 Postcheck API starting on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /v1/postcode/validate - Suburb/state locality lookup");
    info!("  POST /v1/address/check     - Postcode/suburb/state cross-check");
    info!("  GET  /v1/stats             - Service statistics");
    info!("  GET  /v1/health            - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");
    info!("");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // Graceful shutdown sequence
    info!("");
    info!("🛑 Shutdown signal received, cleaning up...");

    let stats = telemetry_for_shutdown.get_stats();
    info!("   Lookups served: {}", stats.lookups_total);
    info!("   Address checks: {}", stats.checks_total);

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("   Stats exported to: {}", path.display()),
        Err(e) => warn!("   Failed to export stats: {}", e),
    }

    info!("Postcheck API shutdown complete");

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════╗
    ║                                              ║
    ║   P O S T C H E C K                          ║
    ║                                              ║
    ║   Australian Postcode Validator  v0.1.0      ║
    ║   postcode · suburb · state                  ║
    ║                                              ║
    ╚══════════════════════════════════════════════╝
    "#
    );
}
