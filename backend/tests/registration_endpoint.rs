//! End-to-end behaviour of `POST /api/v1/register`.
//!
//! Drives the real Actix handler, trace middleware and registration service
//! while substituting a recording identity-provider double, so every property
//! of the pipeline is observable without network access.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::Value;
use signup::Trace;
use signup::domain::ports::{IdentityProvider, SignUpError, SignUpRequest};
use signup::domain::{ClientCredentials, RegistrationService, TRACE_ID_HEADER, TraceId};
use signup::inbound::http::register::{MAX_BODY_BYTES, register};
use signup::inbound::http::state::HttpState;

const CLIENT_ID: &str = "client_id";
const CLIENT_SECRET: &str = "client_secret";

const ALICE: &str = r#"{
    "username": "alice",
    "email": "alice@example.com",
    "password": "Passw0rd!",
    "fullName": "Alice A",
    "phoneNumber": "+15551234567"
}"#;

// -----------------------------------------------------------------------------
// Recording identity-provider double
// -----------------------------------------------------------------------------

#[derive(Clone)]
struct RecordingProvider {
    calls: Arc<Mutex<Vec<SignUpRequest>>>,
    response: Result<(), SignUpError>,
}

impl RecordingProvider {
    fn answering(response: Result<(), SignUpError>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    fn calls(&self) -> Vec<SignUpRequest> {
        self.calls.lock().expect("provider calls lock").clone()
    }
}

#[async_trait]
impl IdentityProvider for RecordingProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError> {
        self.calls
            .lock()
            .expect("provider calls lock")
            .push(request.clone());
        self.response.clone()
    }
}

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

struct Reply {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn post_register(provider: &RecordingProvider, payload: &str) -> Reply {
    let credentials =
        ClientCredentials::try_new(CLIENT_ID, CLIENT_SECRET).expect("fixture credentials");
    let service = RegistrationService::new(credentials, Arc::new(provider.clone()));
    let state = HttpState::new(Arc::new(service));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").service(register)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .insert_header(("content-type", "application/json"))
        .set_payload(payload.to_owned())
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;
    Reply {
        status,
        trace_id,
        body,
    }
}

#[fixture]
fn accepting_provider() -> RecordingProvider {
    RecordingProvider::answering(Ok(()))
}

fn a_provider_that_already_knows_alice() -> RecordingProvider {
    RecordingProvider::answering(Err(SignUpError::username_exists(
        "User already exists",
    )))
}

fn the_reply_carries_the_envelope(reply: &Reply, status: StatusCode, message: &str, success: bool) {
    assert_eq!(reply.status, status);
    assert_eq!(reply.body["message"], message);
    assert_eq!(reply.body["success"], success);
    let keys: Vec<&String> = reply
        .body
        .as_object()
        .expect("object body")
        .keys()
        .collect();
    assert_eq!(keys.len(), 2, "body must only carry message and success");
}

// -----------------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------------

#[rstest]
#[actix_web::test]
async fn valid_signup_is_created_with_one_provider_call(accepting_provider: RecordingProvider) {
    let reply = post_register(&accepting_provider, ALICE).await;
    the_reply_carries_the_envelope(&reply, StatusCode::CREATED, "Registration successful", true);

    let calls = accepting_provider.calls();
    assert_eq!(calls.len(), 1);
    let call = calls.first().expect("one call");
    assert_eq!(call.client_id, CLIENT_ID);
    assert_eq!(call.username, "alice");
    assert_eq!(
        call.secret_hash.as_str(),
        "81iuSP9vw+lLmdu4TaGxAiOSDesoJTrCH+yj2j2ejJM="
    );
    assert_eq!(call.attribute("name"), Some("Alice A"));
    assert_eq!(call.attribute("phone_number"), Some("+15551234567"));
}

#[rstest]
#[actix_web::test]
async fn taken_username_is_a_conflict() {
    let provider = a_provider_that_already_knows_alice();
    let reply = post_register(&provider, ALICE).await;
    the_reply_carries_the_envelope(&reply, StatusCode::CONFLICT, "User already exists", false);
    assert_eq!(provider.calls().len(), 1);
}

#[rstest]
#[case::weak_password(
    r#"{"username":"alice","email":"alice@example.com","password":"password","fullName":"Alice A","phoneNumber":"+15551234567"}"#,
    "Invalid password"
)]
#[case::invalid_email(
    r#"{"username":"alice","email":"invalid_email","password":"Passw0rd!","fullName":"Alice A","phoneNumber":"+15551234567"}"#,
    "Invalid email"
)]
#[case::missing_username(
    r#"{"email":"alice@example.com","password":"Passw0rd!","fullName":"Alice A","phoneNumber":"+15551234567"}"#,
    "Missing required field: username"
)]
#[case::blank_phone(
    r#"{"username":"alice","email":"alice@example.com","password":"Passw0rd!","fullName":"Alice A","phoneNumber":"   "}"#,
    "Missing required field: phoneNumber"
)]
#[case::not_json("this is not json", "Invalid request body")]
#[case::wrong_type(r#"{"username":42}"#, "Invalid request body")]
#[actix_web::test]
async fn invalid_requests_are_rejected_without_a_provider_call(
    accepting_provider: RecordingProvider,
    #[case] payload: &str,
    #[case] message: &str,
) {
    let reply = post_register(&accepting_provider, payload).await;
    the_reply_carries_the_envelope(&reply, StatusCode::BAD_REQUEST, message, false);
    assert!(
        accepting_provider.calls().is_empty(),
        "provider must not be called for rejected requests"
    );
}

#[rstest]
#[case(SignUpError::rejected("InvalidParameterException", "Invalid phone number format."))]
#[case(SignUpError::transport("connection refused"))]
#[case(SignUpError::timeout())]
#[actix_web::test]
async fn provider_failures_are_opaque_server_errors(#[case] error: SignUpError) {
    let leaked = error.to_string();
    let provider = RecordingProvider::answering(Err(error));
    let reply = post_register(&provider, ALICE).await;
    the_reply_carries_the_envelope(
        &reply,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        false,
    );
    assert!(!reply.body.to_string().contains(&leaked));
}

#[rstest]
#[actix_web::test]
async fn every_reply_carries_a_trace_id(accepting_provider: RecordingProvider) {
    for payload in [ALICE, "{"] {
        let reply = post_register(&accepting_provider, payload).await;
        let trace_id = reply.trace_id.expect("trace-id header");
        assert!(trace_id.parse::<TraceId>().is_ok(), "trace id must be a UUID");
    }
}

#[rstest]
#[actix_web::test]
async fn oversized_body_is_a_bad_request_envelope(accepting_provider: RecordingProvider) {
    let padding = "x".repeat(MAX_BODY_BYTES);
    let payload = format!(
        r#"{{"username":"alice","email":"alice@example.com","password":"Passw0rd!","fullName":"{padding}","phoneNumber":"+15551234567"}}"#
    );
    let reply = post_register(&accepting_provider, &payload).await;
    the_reply_carries_the_envelope(&reply, StatusCode::BAD_REQUEST, "Invalid request body", false);
    assert!(reply.trace_id.is_some(), "rejected bodies still carry a trace id");
    assert!(accepting_provider.calls().is_empty());
}
