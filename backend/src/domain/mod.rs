//! Registration domain.
//!
//! Purpose: validate signup payloads, derive the provider secret hash and
//! turn one identity-provider call into a [`RegistrationOutcome`]. Nothing in
//! this module knows about HTTP.
//!
//! Public surface:
//! - RegistrationRequest: inbound signup fields.
//! - validate_registration / ValidationFailure: field validator.
//! - SecretHash / ClientCredentials: provider client identity.
//! - RegistrationOutcome: closed set of pipeline results.
//! - RegistrationService: the orchestrator behind `RegistrationCommand`.

pub mod client_credentials;
pub mod outcome;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod secret_hash;
pub mod trace_id;
pub mod validation;

pub use self::client_credentials::{ClientCredentials, ClientCredentialsError};
pub use self::outcome::{PROVIDER_ERROR_MESSAGE, RegistrationOutcome};
pub use self::registration::RegistrationRequest;
pub use self::registration_service::{DEFAULT_PROVIDER_TIMEOUT, RegistrationService};
pub use self::secret_hash::SecretHash;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    PASSWORD_MIN_CHARS, RequiredField, ValidationFailure, ValidationResult, is_strong_password,
    is_valid_email, validate_registration,
};
