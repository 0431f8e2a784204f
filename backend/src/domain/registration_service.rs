//! Domain service orchestrating a single account registration.
//!
//! The pipeline is strictly linear: parse, validate, derive the secret hash,
//! call the identity provider once, classify. Every stage is terminal on
//! failure and the service holds no per-request state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ATTRIBUTE_EMAIL, ATTRIBUTE_NAME, ATTRIBUTE_PHONE_NUMBER, IdentityProvider, RegistrationCommand,
    SignUpFailureKind, SignUpRequest, UserAttribute,
};
use crate::domain::{
    ClientCredentials, RegistrationOutcome, RegistrationRequest, TraceId, validate_registration,
};

/// Default upper bound on the identity provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Registration use-case backed by an [`IdentityProvider`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use signup::domain::ports::IdentityProvider;
/// use signup::domain::{ClientCredentials, RegistrationService};
///
/// fn build(provider: Arc<dyn IdentityProvider>) -> RegistrationService {
///     let credentials = ClientCredentials::try_new("cid", "secret").expect("credentials");
///     RegistrationService::new(credentials, provider)
/// }
/// ```
#[derive(Clone)]
pub struct RegistrationService {
    credentials: ClientCredentials,
    provider: Arc<dyn IdentityProvider>,
    provider_timeout: Duration,
}

impl RegistrationService {
    /// Build the service with [`DEFAULT_PROVIDER_TIMEOUT`].
    pub fn new(credentials: ClientCredentials, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            credentials,
            provider,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Override the provider call deadline.
    #[must_use]
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Parse and register a raw JSON payload.
    pub async fn register_payload(&self, payload: &[u8]) -> RegistrationOutcome {
        match RegistrationRequest::from_json(payload) {
            Ok(request) => self.register(&request).await,
            Err(failure) => {
                let outcome = RegistrationOutcome::ValidationFailed(failure);
                log_outcome(None, &outcome);
                outcome
            }
        }
    }

    /// Validate `request` and forward it to the identity provider.
    pub async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        let outcome = match validate_registration(request) {
            Ok(()) => self.sign_up(request).await,
            Err(failure) => RegistrationOutcome::ValidationFailed(failure),
        };
        log_outcome(Some(request.username()), &outcome);
        outcome
    }

    async fn sign_up(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        let sign_up = self.build_sign_up(request);
        let call = self.provider.sign_up(&sign_up);
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(())) => RegistrationOutcome::Created,
            Ok(Err(err)) => match err.kind() {
                SignUpFailureKind::AlreadyExists => {
                    RegistrationOutcome::conflict(request.username())
                }
                SignUpFailureKind::Other => RegistrationOutcome::provider_error(err.to_string()),
            },
            Err(_) => RegistrationOutcome::provider_error(format!(
                "identity provider call exceeded {} ms",
                self.provider_timeout.as_millis()
            )),
        }
    }

    fn build_sign_up(&self, request: &RegistrationRequest) -> SignUpRequest {
        SignUpRequest {
            client_id: self.credentials.client_id().to_owned(),
            secret_hash: self.credentials.secret_hash_for(request.username()),
            username: request.username().to_owned(),
            password: request.password().to_owned().into(),
            attributes: vec![
                UserAttribute::new(ATTRIBUTE_EMAIL, request.email()),
                UserAttribute::new(ATTRIBUTE_NAME, request.full_name()),
                UserAttribute::new(ATTRIBUTE_PHONE_NUMBER, request.phone_number()),
            ],
        }
    }
}

fn log_outcome(username: Option<&str>, outcome: &RegistrationOutcome) {
    let current_trace = TraceId::current().map(|id| id.to_string());
    let trace_id = current_trace.as_deref().unwrap_or("-");
    let username = username.unwrap_or("-");
    match outcome {
        RegistrationOutcome::Created => {
            info!(trace_id, username, outcome = outcome.label(), "account registered");
        }
        RegistrationOutcome::Conflict { .. } => {
            info!(trace_id, username, outcome = outcome.label(), "username already taken");
        }
        RegistrationOutcome::ValidationFailed(failure) => {
            warn!(
                trace_id,
                username,
                outcome = outcome.label(),
                reason = failure.code(),
                "registration rejected"
            );
        }
        RegistrationOutcome::ProviderError { detail } => {
            error!(
                trace_id,
                username,
                outcome = outcome.label(),
                detail = detail.as_str(),
                "failed at creating new user"
            );
        }
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(&self, payload: &[u8]) -> RegistrationOutcome {
        self.register_payload(payload).await
    }
}

#[cfg(test)]
mod tests;
