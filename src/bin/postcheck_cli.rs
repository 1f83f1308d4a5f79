//! Postcheck Terminal Form
//!
//! Interactive stand-in for the browser form: asks for postcode, suburb
//! and state, fetches candidate localities, then cross-validates the
//! triple and prints the single-line status message.
//!
//! Usage:
//!   cargo run --bin postcheck_cli
//!
//! Environment:
//!   AUSPOST_AUTH_KEY - AusPost API credential (required)

use postcheck::models::config::AuspostConfig;
use postcheck::FormSession;
use postcheck::LookupResolver;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let resolver = LookupResolver::new(AuspostConfig::from_env()?);
    let mut session = FormSession::new();

    println!("Australian Postcode Validator");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    session.set_postcode(prompt(&mut lines, "Postcode: ")?);
    session.set_suburb(prompt(&mut lines, "Suburb: ")?);
    session.set_state(prompt(&mut lines, "State: ")?);

    let request = session.begin_lookup();
    println!("Loading...");
    let result = resolver.resolve(&request.query_string, &request.state).await;
    session.apply_lookup(request.seq, result);

    println!("{}", session.validate());

    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?.unwrap_or_default())
}
