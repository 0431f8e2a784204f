//! Identity-provider outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `IdentityProvider`
//! port against the managed provider's JSON SignUp API.

mod dto;
mod http_client;

pub use http_client::{CognitoIdentityProvider, DEFAULT_REGION, regional_endpoint};
