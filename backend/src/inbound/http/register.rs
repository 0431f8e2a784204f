//! Registration endpoint.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","email":"alice@example.com",
//!     "password":"Passw0rd!","fullName":"Alice A","phoneNumber":"+15551234567"}
//! ```
//!
//! The handler reads the raw body itself so that a malformed or oversized
//! payload surfaces as a domain validation outcome rather than a framework
//! extractor error.

use actix_web::error::PayloadError;
use actix_web::post;
use actix_web::web::{self, BytesMut};
use futures_util::StreamExt;
use thiserror::Error;
use tracing::warn;

use crate::domain::{RegistrationOutcome, RegistrationRequest, TraceId, ValidationFailure};
use crate::inbound::http::response::RegistrationResponse;
use crate::inbound::http::state::HttpState;

/// Largest accepted request body in bytes.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
enum BodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    Read(#[from] PayloadError),
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<BytesMut, BodyError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Register a new account with the identity provider.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body(content = RegistrationRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Account created", body = RegistrationResponse),
        (status = 400, description = "Malformed body or invalid field", body = RegistrationResponse),
        (status = 409, description = "Username already exists", body = RegistrationResponse),
        (status = 500, description = "Identity provider failure", body = RegistrationResponse)
    ),
    tags = ["registration"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(state: web::Data<HttpState>, payload: web::Payload) -> RegistrationOutcome {
    match read_body(payload, MAX_BODY_BYTES).await {
        Ok(body) => state.registration.register(body.as_ref()).await,
        Err(err) => {
            let current_trace = TraceId::current().map(|id| id.to_string());
            let trace_id = current_trace.as_deref().unwrap_or("-");
            warn!(trace_id, error = %err, "request body rejected");
            RegistrationOutcome::ValidationFailed(ValidationFailure::MalformedBody)
        }
    }
}
