//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod registration_command;

#[cfg(test)]
pub(crate) use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    ATTRIBUTE_EMAIL, ATTRIBUTE_NAME, ATTRIBUTE_PHONE_NUMBER, IdentityProvider, SignUpError,
    SignUpFailureKind, SignUpRequest, UserAttribute,
};
#[cfg(test)]
pub(crate) use registration_command::MockRegistrationCommand;
pub use registration_command::{FixtureRegistrationCommand, RegistrationCommand};
