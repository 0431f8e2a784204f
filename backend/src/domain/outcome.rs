//! Terminal results of one registration attempt.
//!
//! Inbound adapters map each variant 1:1 onto a transport response; the
//! domain never decides status codes.

use super::validation::ValidationFailure;

/// Public message for provider failures. Provider detail stays in the logs.
pub const PROVIDER_ERROR_MESSAGE: &str = "Internal server error";

/// Closed set of results the registration pipeline can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The identity provider created the account.
    Created,
    /// The identity provider already holds an account with this username.
    Conflict {
        /// Username that was already taken.
        username: String,
    },
    /// The request was refused locally; the provider was not called.
    ValidationFailed(ValidationFailure),
    /// The provider call failed for any other reason, including a timeout.
    ProviderError {
        /// Diagnostic detail for logs. Never returned to callers.
        detail: String,
    },
}

impl RegistrationOutcome {
    /// Helper for conflicts.
    pub fn conflict(username: impl Into<String>) -> Self {
        Self::Conflict {
            username: username.into(),
        }
    }

    /// Helper for provider failures.
    pub fn provider_error(detail: impl Into<String>) -> Self {
        Self::ProviderError {
            detail: detail.into(),
        }
    }

    /// Whether the account was created.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Created)
    }

    /// Caller-facing message for this outcome.
    ///
    /// # Examples
    /// ```
    /// use signup::domain::{RegistrationOutcome, ValidationFailure};
    ///
    /// assert_eq!(RegistrationOutcome::Created.public_message(), "Registration successful");
    /// assert_eq!(
    ///     RegistrationOutcome::provider_error("ResourceNotFoundException: pool gone")
    ///         .public_message(),
    ///     "Internal server error"
    /// );
    /// assert_eq!(
    ///     RegistrationOutcome::ValidationFailed(ValidationFailure::InvalidEmail).public_message(),
    ///     "Invalid email"
    /// );
    /// ```
    pub fn public_message(&self) -> String {
        match self {
            Self::Created => "Registration successful".to_owned(),
            Self::Conflict { .. } => "User already exists".to_owned(),
            Self::ValidationFailed(failure) => failure.to_string(),
            Self::ProviderError { .. } => PROVIDER_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Short label used as a structured log field.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Conflict { .. } => "conflict",
            Self::ValidationFailed(_) => "validation_failed",
            Self::ProviderError { .. } => "provider_error",
        }
    }
}

impl From<ValidationFailure> for RegistrationOutcome {
    fn from(value: ValidationFailure) -> Self {
        Self::ValidationFailed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequiredField;
    use rstest::rstest;

    #[rstest]
    #[case(RegistrationOutcome::Created, "Registration successful", true)]
    #[case(RegistrationOutcome::conflict("alice"), "User already exists", false)]
    #[case(
        RegistrationOutcome::ValidationFailed(ValidationFailure::MissingField(RequiredField::FullName)),
        "Missing required field: fullName",
        false
    )]
    #[case(
        RegistrationOutcome::provider_error("InternalErrorException: stack trace here"),
        "Internal server error",
        false
    )]
    fn public_messages(
        #[case] outcome: RegistrationOutcome,
        #[case] message: &str,
        #[case] success: bool,
    ) {
        assert_eq!(outcome.public_message(), message);
        assert_eq!(outcome.is_success(), success);
    }

    #[rstest]
    fn provider_detail_never_reaches_public_message() {
        let outcome = RegistrationOutcome::provider_error("secret-internal-code-123");
        assert!(!outcome.public_message().contains("secret-internal-code-123"));
    }
}
