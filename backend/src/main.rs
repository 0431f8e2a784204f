//! Signup entry-point: loads settings, wires the identity provider and serves
//! the registration endpoint.

mod server;

use actix_web::web;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{CognitoSettings, ListenerSettings, ServerConfig, StartupError, create_server};
use signup::inbound::http::health::HealthState;

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

    let config = load_config().map_err(|err| {
        error!(error = %err, "invalid configuration");
        std::io::Error::other(err.to_string())
    })?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

fn load_config() -> Result<ServerConfig, StartupError> {
    let cognito = CognitoSettings::from_env()?;
    let listener = ListenerSettings::from_env()?;
    ServerConfig::from_settings(&cognito, &listener)
}
