//! Translation of [`RegistrationOutcome`] into HTTP responses.
//!
//! Every outcome renders the same `{message, success}` envelope. Provider
//! detail never reaches the body.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RegistrationOutcome;

/// Response envelope returned by the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    /// Human-readable summary of the outcome.
    #[schema(example = "Registration successful")]
    pub message: String,
    /// True only when the account was created.
    pub success: bool,
}

impl From<&RegistrationOutcome> for RegistrationResponse {
    fn from(outcome: &RegistrationOutcome) -> Self {
        Self {
            message: outcome.public_message(),
            success: outcome.is_success(),
        }
    }
}

/// Status code for each outcome.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use signup::domain::RegistrationOutcome;
/// use signup::inbound::http::status_for;
///
/// assert_eq!(status_for(&RegistrationOutcome::Created), StatusCode::CREATED);
/// assert_eq!(status_for(&RegistrationOutcome::conflict("alice")), StatusCode::CONFLICT);
/// ```
pub fn status_for(outcome: &RegistrationOutcome) -> StatusCode {
    match outcome {
        RegistrationOutcome::Created => StatusCode::CREATED,
        RegistrationOutcome::Conflict { .. } => StatusCode::CONFLICT,
        RegistrationOutcome::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        RegistrationOutcome::ProviderError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl Responder for RegistrationOutcome {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(status_for(&self)).json(RegistrationResponse::from(&self))
    }
}
