//! Driven port for the managed identity provider's signup operation.
//!
//! Adapters translate their client-specific failures into [`SignUpError`].
//! The domain only asks one question of an error: does it mean the username
//! is already taken? See [`SignUpError::kind`].

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::SecretHash;

use super::define_port_error;

/// Provider attribute key for the email address.
pub const ATTRIBUTE_EMAIL: &str = "email";
/// Provider attribute key for the display name. The provider schema calls it
/// `name`; `fullName` is only the inbound JSON key.
pub const ATTRIBUTE_NAME: &str = "name";
/// Provider attribute key for the phone number.
pub const ATTRIBUTE_PHONE_NUMBER: &str = "phone_number";

/// One standard user attribute sent with the signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    /// Attribute key in the provider schema.
    pub name: &'static str,
    /// Attribute value supplied by the caller.
    pub value: String,
}

impl UserAttribute {
    /// Build an attribute from a schema key and value.
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Fully prepared signup call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Public client id of this application.
    pub client_id: String,
    /// Keyed hash proving possession of the client secret.
    pub secret_hash: SecretHash,
    /// Requested username.
    pub username: String,
    /// Requested password.
    pub password: Zeroizing<String>,
    /// Standard attributes (`email`, `name`, `phone_number`).
    pub attributes: Vec<UserAttribute>,
}

impl SignUpRequest {
    /// Look up an attribute value by provider key.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("client_id", &self.client_id)
            .field("secret_hash", &self.secret_hash)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Classification the domain relies on when a signup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFailureKind {
    /// The username is already registered.
    AlreadyExists,
    /// Any other failure.
    Other,
}

define_port_error! {
    /// Errors raised by identity-provider adapters.
    pub enum SignUpError {
        /// Provider reported that the username is taken.
        UsernameExists {
            /// Provider message.
            message: String
        } => "username already exists: {message}",
        /// Provider refused the request with another error code.
        Rejected {
            /// Provider error code, e.g. `InvalidPasswordException`.
            code: String,
            /// Provider message.
            message: String,
        } => "identity provider rejected signup ({code}): {message}",
        /// The request never produced a provider response.
        Transport {
            /// Transport failure description.
            message: String
        } => "identity provider unreachable: {message}",
        /// The provider did not answer before the deadline.
        Timeout => "identity provider call timed out",
        /// The provider answered with an unreadable payload.
        Decode {
            /// Decoding failure description.
            message: String
        } => "identity provider response could not be decoded: {message}",
    }
}

impl SignUpError {
    /// Classify the failure for outcome mapping.
    pub const fn kind(&self) -> SignUpFailureKind {
        match self {
            Self::UsernameExists { .. } => SignUpFailureKind::AlreadyExists,
            _ => SignUpFailureKind::Other,
        }
    }
}

/// Port wrapping the provider's signup operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create the account described by `request`.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError>;
}
