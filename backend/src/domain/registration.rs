//! Registration request submitted by a prospective user.
//!
//! The request is parsed straight from the inbound payload bytes so that a
//! malformed body is reported before any field validation runs. Absent keys
//! deserialize as empty strings and are rejected later by
//! [`crate::domain::validate_registration`].

use std::fmt;

use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::validation::ValidationFailure;

/// Signup payload for `POST /api/v1/register`.
///
/// ## Invariants
/// - Constructed once per invocation and never mutated afterwards.
/// - `password` is wiped from memory when the request is dropped.
///
/// # Examples
/// ```
/// use signup::domain::RegistrationRequest;
///
/// let body = br#"{"username":"alice","email":"alice@example.com",
///     "password":"Passw0rd!","fullName":"Alice A","phoneNumber":"+15551234567"}"#;
/// let request = RegistrationRequest::from_json(body).expect("well-formed payload");
/// assert_eq!(request.username(), "alice");
/// assert_eq!(request.full_name(), "Alice A");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    username: String,
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    email: String,
    #[serde(default, deserialize_with = "deserialize_password")]
    #[schema(value_type = String, example = "Passw0rd!")]
    password: Zeroizing<String>,
    #[serde(default)]
    #[schema(example = "Alice A")]
    full_name: String,
    #[serde(default)]
    #[schema(example = "+15551234567")]
    phone_number: String,
}

fn deserialize_password<'de, D>(deserializer: D) -> Result<Zeroizing<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(Zeroizing::new)
}

impl RegistrationRequest {
    /// Build a request from its individual fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
            full_name: full_name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Parse a JSON payload into a request.
    ///
    /// # Errors
    /// Returns [`ValidationFailure::MalformedBody`] when the bytes are not a
    /// JSON object whose known keys hold strings.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationFailure> {
        serde_json::from_slice(body).map_err(|err| {
            tracing::debug!(error = %err, "registration payload rejected");
            ValidationFailure::MalformedBody
        })
    }

    /// Account name requested by the caller.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password, forwarded once to the identity provider.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name of the user.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Phone number in the format expected by the identity provider.
    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}
