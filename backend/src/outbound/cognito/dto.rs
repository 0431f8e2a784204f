//! Wire DTOs for the provider's JSON 1.1 SignUp call.
//!
//! Requests borrow from the domain `SignUpRequest`; error responses are
//! decoded leniently because the provider varies the message key casing.

use serde::{Deserialize, Serialize};

use crate::domain::ports::SignUpRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct SignUpRequestDto<'a> {
    pub(super) client_id: &'a str,
    pub(super) secret_hash: &'a str,
    pub(super) username: &'a str,
    pub(super) password: &'a str,
    pub(super) user_attributes: Vec<AttributeTypeDto<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct AttributeTypeDto<'a> {
    pub(super) name: &'a str,
    pub(super) value: &'a str,
}

impl<'a> From<&'a SignUpRequest> for SignUpRequestDto<'a> {
    fn from(request: &'a SignUpRequest) -> Self {
        Self {
            client_id: request.client_id.as_str(),
            secret_hash: request.secret_hash.as_str(),
            username: request.username.as_str(),
            password: request.password.as_str(),
            user_attributes: request
                .attributes
                .iter()
                .map(|attribute| AttributeTypeDto {
                    name: attribute.name,
                    value: attribute.value.as_str(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(super) struct SignUpResponseDto {
    pub(super) user_sub: Option<String>,
    pub(super) user_confirmed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponseDto {
    #[serde(rename = "__type")]
    pub(super) error_type: Option<String>,
    #[serde(alias = "Message")]
    pub(super) message: Option<String>,
}
