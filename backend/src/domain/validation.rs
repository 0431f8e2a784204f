//! Field validation for registration requests.
//!
//! Checks run cheapest first: required text fields, then email syntax, then
//! password strength. The first failure wins. Nothing here performs I/O.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::registration::RegistrationRequest;

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@(?:[A-Za-z0-9\-]+\.)+[A-Za-z]{2,}$")
        .unwrap_or_else(|err| panic!("email pattern must compile: {err}"))
});

/// Required free-text fields of a [`RegistrationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// `username`
    Username,
    /// `fullName`
    FullName,
    /// `phoneNumber`
    PhoneNumber,
}

impl RequiredField {
    /// Field name as it appears in the inbound JSON payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FullName => "fullName",
            Self::PhoneNumber => "phoneNumber",
        }
    }
}

/// Reason a registration request was refused before reaching the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The body was not a JSON object of string fields.
    #[error("Invalid request body")]
    MalformedBody,
    /// A required field was empty once trimmed.
    #[error("Missing required field: {}", .0.as_str())]
    MissingField(RequiredField),
    /// The email address is not `local@domain.tld`.
    #[error("Invalid email")]
    InvalidEmail,
    /// The password misses the length or a character class.
    #[error("Invalid password")]
    WeakPassword,
}

impl ValidationFailure {
    /// Stable machine-readable code used in logs.
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::WeakPassword => "weak_password",
        }
    }
}

/// Result of running the field validator.
pub type ValidationResult = Result<(), ValidationFailure>;

/// Validate every field of a registration request.
///
/// # Errors
/// Returns the first [`ValidationFailure`] encountered.
///
/// # Examples
/// ```
/// use signup::domain::{RegistrationRequest, ValidationFailure, validate_registration};
///
/// let ok = RegistrationRequest::new("alice", "alice@example.com", "Passw0rd!", "Alice A", "+15551234567");
/// assert_eq!(validate_registration(&ok), Ok(()));
///
/// let weak = RegistrationRequest::new("alice", "alice@example.com", "password", "Alice A", "+15551234567");
/// assert_eq!(validate_registration(&weak), Err(ValidationFailure::WeakPassword));
/// ```
pub fn validate_registration(request: &RegistrationRequest) -> ValidationResult {
    let required = [
        (RequiredField::Username, request.username()),
        (RequiredField::FullName, request.full_name()),
        (RequiredField::PhoneNumber, request.phone_number()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationFailure::MissingField(*field));
    }

    if !is_valid_email(request.email()) {
        return Err(ValidationFailure::InvalidEmail);
    }

    if !is_strong_password(request.password()) {
        return Err(ValidationFailure::WeakPassword);
    }

    Ok(())
}

/// Check `local@domain.tld` syntax. Domain existence is not verified.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check the password policy: at least [`PASSWORD_MIN_CHARS`] characters with
/// an uppercase letter, a lowercase letter, a digit and a special character.
///
/// A special character is anything that is not a letter, an ASCII digit or
/// `_`, so other numeric symbols such as `²` count as special.
pub fn is_strong_password(password: &str) -> bool {
    let long_enough = password.chars().count() >= PASSWORD_MIN_CHARS;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphabetic() && !c.is_ascii_digit() && c != '_');

    long_enough && has_upper && has_lower && has_digit && has_special
}
