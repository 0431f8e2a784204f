//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::RegistrationCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case.
    pub registration: Arc<dyn RegistrationCommand>,
}

impl HttpState {
    /// Build state around a registration command.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use signup::domain::ports::FixtureRegistrationCommand;
    /// use signup::inbound::http::HttpState;
    ///
    /// let _state = HttpState::new(Arc::new(FixtureRegistrationCommand::default()));
    /// ```
    pub fn new(registration: Arc<dyn RegistrationCommand>) -> Self {
        Self { registration }
    }
}
