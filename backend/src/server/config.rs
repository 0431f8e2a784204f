//! Process configuration loaded via OrthoConfig.
//!
//! Raw settings are converted into domain values once at startup; a missing
//! credential or an unusable endpoint stops the process before it binds.

use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use signup::domain::{ClientCredentials, ClientCredentialsError, DEFAULT_PROVIDER_TIMEOUT};
use signup::outbound::cognito::{DEFAULT_REGION, regional_endpoint};
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings layer could not be read.
    #[error("failed to load {section} settings: {message}")]
    Load {
        section: &'static str,
        message: String,
    },
    /// Client id or secret missing or blank.
    #[error(transparent)]
    Credentials(#[from] ClientCredentialsError),
    /// Endpoint override or region does not form a URL.
    #[error("invalid identity provider endpoint {value:?}: {source}")]
    Endpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// A zero timeout would fail every call.
    #[error("identity provider timeout must be greater than zero")]
    ZeroTimeout,
    /// Bind host is not an IP address.
    #[error("invalid bind host {value:?}: {source}")]
    Host {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Identity-provider client settings (`COGNITO_*`).
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COGNITO")]
pub struct CognitoSettings {
    /// Public client id.
    pub client_id: Option<String>,
    /// Confidential client secret.
    pub client_secret: Option<String>,
    /// Provider region used to derive the endpoint.
    pub region: Option<String>,
    /// Full endpoint override, e.g. a local emulator.
    pub endpoint: Option<String>,
    /// Provider call deadline in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for CognitoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CognitoSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl CognitoSettings {
    /// Load from the environment and configuration files.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter(program_name()).map_err(|err| ConfigError::Load {
            section: "identity provider",
            message: err.to_string(),
        })
    }

    /// Validated client credentials.
    pub fn credentials(&self) -> Result<ClientCredentials, ConfigError> {
        let client_id = self.client_id.clone().unwrap_or_default();
        let client_secret = self.client_secret.clone().unwrap_or_default();
        ClientCredentials::try_new(client_id, client_secret).map_err(ConfigError::from)
    }

    /// Configured region, falling back to the default.
    pub fn region(&self) -> &str {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }

    /// Endpoint override when set, otherwise the regional endpoint.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        match self.endpoint.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Url::parse(raw).map_err(|source| ConfigError::Endpoint {
                value: raw.to_owned(),
                source,
            }),
            _ => regional_endpoint(self.region()).map_err(|source| ConfigError::Endpoint {
                value: self.region().to_owned(),
                source,
            }),
        }
    }

    /// Provider call deadline, [`DEFAULT_PROVIDER_TIMEOUT`] when unset.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match self.timeout_ms {
            None => Ok(DEFAULT_PROVIDER_TIMEOUT),
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(ms) => Ok(Duration::from_millis(ms)),
        }
    }
}

/// Listener settings (`SIGNUP_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SIGNUP")]
pub struct ListenerSettings {
    /// IP address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
}

impl ListenerSettings {
    /// Load from the environment and configuration files.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter(program_name()).map_err(|err| ConfigError::Load {
            section: "listener",
            message: err.to_string(),
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.as_deref().map_or(DEFAULT_HOST, str::trim);
        let ip: IpAddr = host.parse().map_err(|source| ConfigError::Host {
            value: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }
}

/// Program name only; settings come from the environment and config files.
fn program_name() -> impl Iterator<Item = std::ffi::OsString> {
    std::env::args_os().take(1)
}
