//! Orchestrator coverage: outcome classification, provider call shape and
//! short-circuiting before the provider is reached.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockIdentityProvider, SignUpError};
use crate::domain::{RequiredField, SecretHash, ValidationFailure};

const CLIENT_ID: &str = "client_id";
const CLIENT_SECRET: &str = "client_secret";

fn credentials() -> ClientCredentials {
    ClientCredentials::try_new(CLIENT_ID, CLIENT_SECRET).expect("fixture credentials")
}

fn alice_request() -> RegistrationRequest {
    RegistrationRequest::new(
        "alice",
        "alice@example.com",
        "Passw0rd!",
        "Alice A",
        "+15551234567",
    )
}

#[fixture]
fn alice() -> RegistrationRequest {
    alice_request()
}

fn service_with(provider: MockIdentityProvider) -> RegistrationService {
    RegistrationService::new(credentials(), Arc::new(provider))
}

fn provider_returning(result: Result<(), SignUpError>) -> MockIdentityProvider {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_sign_up()
        .times(1)
        .returning(move |_| result.clone());
    provider
}

fn provider_never_called() -> MockIdentityProvider {
    let mut provider = MockIdentityProvider::new();
    provider.expect_sign_up().never();
    provider
}

fn a_provider_that_accepts_the_signup() -> MockIdentityProvider {
    provider_returning(Ok(()))
}

fn a_provider_that_reports_the_username_exists() -> MockIdentityProvider {
    provider_returning(Err(SignUpError::username_exists("User already exists")))
}

async fn alice_registers(provider: MockIdentityProvider) -> RegistrationOutcome {
    service_with(provider).register(&alice_request()).await
}

fn the_account_is_created(outcome: RegistrationOutcome) {
    assert_eq!(outcome, RegistrationOutcome::Created);
}

fn a_conflict_for_alice_is_reported(outcome: RegistrationOutcome) {
    assert_eq!(outcome, RegistrationOutcome::conflict("alice"));
}

#[rstest]
#[tokio::test]
async fn successful_signup_is_created() {
    let provider = a_provider_that_accepts_the_signup();
    let outcome = alice_registers(provider).await;
    the_account_is_created(outcome);
}

#[rstest]
#[tokio::test]
async fn existing_username_is_a_conflict() {
    let provider = a_provider_that_reports_the_username_exists();
    let outcome = alice_registers(provider).await;
    a_conflict_for_alice_is_reported(outcome);
}

#[rstest]
#[case(SignUpError::rejected("InvalidParameterException", "Invalid phone number format."))]
#[case(SignUpError::transport("connection reset by peer"))]
#[case(SignUpError::decode("expected value at line 1 column 1"))]
#[case(SignUpError::timeout())]
#[tokio::test]
async fn other_provider_failures_are_provider_errors(
    alice: RegistrationRequest,
    #[case] error: SignUpError,
) {
    let expected_detail = error.to_string();
    let outcome = service_with(provider_returning(Err(error)))
        .register(&alice)
        .await;
    assert_eq!(outcome, RegistrationOutcome::provider_error(expected_detail));
}

#[rstest]
#[tokio::test]
async fn signup_call_carries_client_identity_and_provider_attribute_keys(
    alice: RegistrationRequest,
) {
    let captured: Arc<Mutex<Option<SignUpRequest>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    let mut provider = MockIdentityProvider::new();
    provider.expect_sign_up().times(1).returning(move |request| {
        *sink.lock().expect("capture lock") = Some(request.clone());
        Ok(())
    });

    let outcome = service_with(provider).register(&alice).await;
    assert_eq!(outcome, RegistrationOutcome::Created);

    let sent = captured
        .lock()
        .expect("capture lock")
        .clone()
        .expect("provider received a request");
    assert_eq!(sent.client_id, CLIENT_ID);
    assert_eq!(sent.username, "alice");
    assert_eq!(sent.password.as_str(), "Passw0rd!");
    assert_eq!(
        sent.secret_hash,
        SecretHash::derive(CLIENT_ID, CLIENT_SECRET, "alice")
    );
    assert_eq!(
        sent.secret_hash.as_str(),
        "81iuSP9vw+lLmdu4TaGxAiOSDesoJTrCH+yj2j2ejJM="
    );

    let keys: Vec<&str> = sent.attributes.iter().map(|attr| attr.name).collect();
    assert_eq!(keys, ["email", "name", "phone_number"]);
    assert_eq!(sent.attribute("email"), Some("alice@example.com"));
    // The provider schema key is `name`; the inbound `fullName` key must not leak through.
    assert_eq!(sent.attribute("name"), Some("Alice A"));
    assert_eq!(sent.attribute("fullName"), None);
    assert_eq!(sent.attribute("phone_number"), Some("+15551234567"));
}

#[rstest]
#[case(
    RegistrationRequest::new("alice", "alice@example.com", "password", "Alice A", "+15551234567"),
    ValidationFailure::WeakPassword
)]
#[case(
    RegistrationRequest::new("alice", "invalid_email", "Passw0rd!", "Alice A", "+15551234567"),
    ValidationFailure::InvalidEmail
)]
#[case(
    RegistrationRequest::new("alice", "alice@example.com", "Passw0rd!", "Alice A", " "),
    ValidationFailure::MissingField(RequiredField::PhoneNumber)
)]
#[tokio::test]
async fn validation_failures_never_reach_the_provider(
    #[case] request: RegistrationRequest,
    #[case] expected: ValidationFailure,
) {
    let outcome = service_with(provider_never_called())
        .register(&request)
        .await;
    assert_eq!(outcome, RegistrationOutcome::ValidationFailed(expected));
}

#[rstest]
#[case(b"this is not json".as_slice())]
#[case(br#"{"username":["alice"]}"#.as_slice())]
#[tokio::test]
async fn malformed_payload_is_rejected_before_validation(#[case] payload: &[u8]) {
    let outcome = service_with(provider_never_called())
        .register_payload(payload)
        .await;
    assert_eq!(
        outcome,
        RegistrationOutcome::ValidationFailed(ValidationFailure::MalformedBody)
    );
}

#[rstest]
#[tokio::test]
async fn command_port_parses_and_registers() {
    let service: Arc<dyn RegistrationCommand> =
        Arc::new(service_with(a_provider_that_accepts_the_signup()));
    let payload = br#"{"username":"alice","email":"alice@example.com","password":"Passw0rd!","fullName":"Alice A","phoneNumber":"+15551234567"}"#;
    assert_eq!(
        RegistrationCommand::register(service.as_ref(), payload).await,
        RegistrationOutcome::Created
    );
}

struct StalledProvider;

#[async_trait]
impl IdentityProvider for StalledProvider {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<(), SignUpError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn provider_timeout_surfaces_as_provider_error(alice: RegistrationRequest) {
    let service = RegistrationService::new(credentials(), Arc::new(StalledProvider))
        .with_provider_timeout(Duration::from_millis(20));
    let outcome = service.register(&alice).await;
    assert_eq!(
        outcome,
        RegistrationOutcome::provider_error("identity provider call exceeded 20 ms")
    );
}
