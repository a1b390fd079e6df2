//! Backend entry-point: wires routes, state, and the optional superuser
//! bootstrap, then drives the HTTP listener.

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use larder::domain::{EmailAddress, Error};
use larder::inbound::http::health::HealthState;
use larder::server::{AppState, ServerConfig, build_state, create_server};

fn bootstrap_error(context: &str, error: &Error) -> std::io::Error {
    std::io::Error::other(format!("{context}: {}", error.message))
}

/// Create the bootstrap superuser when credentials are configured.
///
/// Idempotent: an existing account with the configured email is left
/// untouched.
async fn bootstrap_superuser(config: &ServerConfig, state: &AppState) -> std::io::Result<()> {
    let Some((email, password)) = config.superuser_credentials() else {
        return Ok(());
    };
    let email = EmailAddress::parse(email)
        .map_err(|e| std::io::Error::other(format!("invalid superuser email: {e}")))?;
    let account = state
        .accounts
        .ensure_superuser(email, password)
        .await
        .map_err(|e| bootstrap_error("superuser bootstrap failed", &e))?;
    info!(email = %account.email(), "superuser account available");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    let state = build_state();
    bootstrap_superuser(&config, &state).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, state.http.clone(), config.bind_addr())?;
    info!(addr = %config.bind_addr(), "listening");
    server.await
}
