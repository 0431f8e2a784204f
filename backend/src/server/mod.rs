//! Server construction and middleware wiring.

mod config;

pub use config::{CognitoSettings, ConfigError, ListenerSettings};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use signup::Trace;
#[cfg(debug_assertions)]
use signup::doc::ApiDoc;
use signup::domain::RegistrationService;
use signup::domain::ports::RegistrationCommand;
use signup::inbound::http::health::{HealthState, live, ready};
use signup::inbound::http::register::register;
use signup::inbound::http::state::HttpState;
use signup::outbound::cognito::CognitoIdentityProvider;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Fully resolved server inputs.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    registration: Arc<dyn RegistrationCommand>,
}

impl ServerConfig {
    /// Resolve settings into the registration service and listener address.
    ///
    /// # Errors
    /// Returns [`StartupError`] when a setting is missing or invalid, or the
    /// HTTP client cannot be built.
    pub fn from_settings(
        cognito: &CognitoSettings,
        listener: &ListenerSettings,
    ) -> Result<Self, StartupError> {
        let credentials = cognito.credentials()?;
        let endpoint = cognito.endpoint()?;
        let timeout = cognito.timeout()?;
        let bind_addr = listener.bind_addr()?;

        info!(%endpoint, ?timeout, "identity provider configured");
        let provider = CognitoIdentityProvider::new(endpoint, timeout)?;
        let service = RegistrationService::new(credentials, Arc::new(provider))
            .with_provider_timeout(timeout);
        Ok(Self {
            bind_addr,
            registration: Arc::new(service),
        })
    }
}

/// Failures before the listener starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings were missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error("failed to build identity provider client: {0}")]
    Client(#[from] reqwest::Error),
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(register);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark readiness once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        registration,
    } = config;
    let http_state = web::Data::new(HttpState::new(registration));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "signup server listening");
    health_state.mark_ready();
    Ok(server)
}
