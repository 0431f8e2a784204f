//! Driving port for the registration use-case.
//!
//! Inbound adapters hand over the raw request body and receive a
//! [`RegistrationOutcome`]; parsing, validation and the provider call all
//! live behind this trait so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::RegistrationOutcome;

/// Domain use-case port for account registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Register the account described by a JSON payload.
    async fn register(&self, payload: &[u8]) -> RegistrationOutcome;
}

/// Fixture command that answers every payload with a fixed outcome.
#[derive(Debug, Clone)]
pub struct FixtureRegistrationCommand {
    outcome: RegistrationOutcome,
}

impl FixtureRegistrationCommand {
    /// Build a fixture returning `outcome` for every call.
    pub fn new(outcome: RegistrationOutcome) -> Self {
        Self { outcome }
    }
}

impl Default for FixtureRegistrationCommand {
    fn default() -> Self {
        Self::new(RegistrationOutcome::Created)
    }
}

#[async_trait]
impl RegistrationCommand for FixtureRegistrationCommand {
    async fn register(&self, _payload: &[u8]) -> RegistrationOutcome {
        self.outcome.clone()
    }
}
