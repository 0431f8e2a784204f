//! Identity-provider client identity used for every signup call.
//!
//! Loaded once at startup and shared read-only across invocations.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::secret_hash::SecretHash;

/// Errors raised while building [`ClientCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientCredentialsError {
    /// Client id was missing or blank.
    #[error("identity provider client id must not be empty")]
    EmptyClientId,
    /// Client secret was missing or blank.
    #[error("identity provider client secret must not be empty")]
    EmptyClientSecret,
}

/// Client id and confidential secret issued by the identity provider.
///
/// ## Invariants
/// - Neither value is blank.
/// - The secret never appears in `Debug` output and is wiped on drop.
///
/// # Examples
/// ```
/// use signup::domain::{ClientCredentials, SecretHash};
///
/// let creds = ClientCredentials::try_new("cid", "s").expect("valid credentials");
/// assert_eq!(creds.secret_hash_for("bob"), SecretHash::derive("cid", "s", "bob"));
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: Zeroizing<String>,
}

impl ClientCredentials {
    /// Validate and wrap the configured client id and secret.
    ///
    /// # Errors
    /// Returns [`ClientCredentialsError`] when either value is blank.
    pub fn try_new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ClientCredentialsError> {
        let client_id = client_id.into();
        let client_secret = Zeroizing::new(client_secret.into());
        if client_id.trim().is_empty() {
            return Err(ClientCredentialsError::EmptyClientId);
        }
        if client_secret.trim().is_empty() {
            return Err(ClientCredentialsError::EmptyClientSecret);
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Public client id sent with each signup.
    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    /// Derive the secret hash for `username`.
    pub fn secret_hash_for(&self, username: &str) -> SecretHash {
        SecretHash::derive(&self.client_id, &self.client_secret, username)
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
