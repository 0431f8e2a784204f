//! HTTP inbound adapter exposing the registration endpoint and health probes.

pub mod health;
pub mod register;
pub mod response;
pub mod state;

pub use response::{RegistrationResponse, status_for};
pub use state::HttpState;
