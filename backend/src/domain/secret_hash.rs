//! Secret hash sent alongside signup calls from confidential clients.
//!
//! The identity provider expects `Base64(HMAC-SHA256(key = client_secret,
//! message = username || client_id))`. The username comes first.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Base64-encoded keyed digest binding a username to the client identity.
///
/// # Examples
/// ```
/// use signup::domain::SecretHash;
///
/// let hash = SecretHash::derive("cid", "s", "bob");
/// assert_eq!(hash, SecretHash::derive("cid", "s", "bob"));
/// assert_eq!(hash.as_str().len(), 44);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Derive the hash for `username` under the given client identity.
    #[expect(
        clippy::expect_used,
        reason = "HMAC accepts keys of any length; construction cannot fail"
    )]
    pub fn derive(client_id: &str, client_secret: &str, username: &str) -> Self {
        let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(username.as_bytes());
        mac.update(client_id.as_bytes());
        Self(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Encoded digest as sent to the provider.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SecretHash {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}
