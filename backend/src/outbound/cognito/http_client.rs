//! Reqwest-backed identity-provider adapter.
//!
//! This adapter owns transport details only: request serialisation, the
//! JSON 1.1 target headers, timeout mapping and error-code classification.
//! The call is authenticated by the secret hash in the body, so no request
//! signing is involved.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ErrorResponseDto, SignUpRequestDto, SignUpResponseDto};
use crate::domain::ports::{IdentityProvider, SignUpError, SignUpRequest};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

const SIGN_UP_TARGET: &str = "AWSCognitoIdentityProviderService.SignUp";
const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const AMZ_TARGET_HEADER: &str = "X-Amz-Target";
const AMZ_ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const USERNAME_EXISTS_CODE: &str = "UsernameExistsException";

/// Public regional endpoint for the identity provider.
///
/// # Errors
///
/// Returns an error when `region` does not form a valid host name.
///
/// # Examples
/// ```
/// use signup::outbound::cognito::regional_endpoint;
///
/// let url = regional_endpoint("eu-west-1").expect("valid region");
/// assert_eq!(url.as_str(), "https://cognito-idp.eu-west-1.amazonaws.com/");
/// ```
pub fn regional_endpoint(region: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://cognito-idp.{}.amazonaws.com/", region.trim()))
}

/// Identity-provider adapter that POSTs SignUp calls to one endpoint.
pub struct CognitoIdentityProvider {
    client: Client,
    endpoint: Url,
}

impl CognitoIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint the adapter posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header(AMZ_TARGET_HEADER, SIGN_UP_TARGET)
            .json(&SignUpRequestDto::from(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_error_response(status, &headers, body.as_ref()));
        }

        // A created account is not undone by an unreadable success body.
        let created: SignUpResponseDto = serde_json::from_slice(body.as_ref()).unwrap_or_default();
        debug!(
            user_sub = created.user_sub.as_deref().unwrap_or("-"),
            user_confirmed = created.user_confirmed.unwrap_or(false),
            "identity provider accepted signup"
        );
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> SignUpError {
    if error.is_timeout() {
        SignUpError::timeout()
    } else {
        SignUpError::transport(error.to_string())
    }
}

fn map_error_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> SignUpError {
    let decoded = serde_json::from_slice::<ErrorResponseDto>(body).ok();
    let header_code = headers
        .get(AMZ_ERROR_TYPE_HEADER)
        .and_then(|value| value.to_str().ok());
    let code = decoded
        .as_ref()
        .and_then(|dto| dto.error_type.as_deref())
        .or(header_code)
        .map(normalise_error_code)
        .filter(|code| !code.is_empty());
    let message = decoded
        .and_then(|dto| dto.message)
        .unwrap_or_else(|| body_preview(body));

    match code {
        Some(code) if code == USERNAME_EXISTS_CODE => SignUpError::username_exists(message),
        Some(code) => SignUpError::rejected(code, message),
        None if status.is_server_error() => {
            SignUpError::transport(status_message(status, &message))
        }
        None => SignUpError::decode(status_message(status, &message)),
    }
}

/// Strip the namespace prefix (`ns#Code`) and the trailing URI (`Code:uri`)
/// the provider may attach to an error type.
fn normalise_error_code(raw: &str) -> String {
    let without_namespace = raw.rsplit_once('#').map_or(raw, |(_, code)| code);
    let without_uri = without_namespace
        .split_once(':')
        .map_or(without_namespace, |(code, _)| code);
    without_uri.trim().to_owned()
}

fn status_message(status: StatusCode, message: &str) -> String {
    if message.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
