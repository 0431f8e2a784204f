//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **cognito**: reqwest-backed client for the identity provider's signup
//!   operation.
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod cognito;
