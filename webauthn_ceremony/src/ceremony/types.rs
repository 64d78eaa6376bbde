use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::ui::{AUTHENTICATE_FORM_ID, PROVISION_FORM_ID};

/// Which ceremony a form runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CeremonyKind {
    /// Registers a new credential for the signed-in account
    Provision,
    /// Signs in with an existing credential
    Authenticate,
}

impl CeremonyKind {
    /// Id of the form whose submission starts this ceremony.
    pub fn form_id(self) -> &'static str {
        match self {
            Self::Provision => PROVISION_FORM_ID,
            Self::Authenticate => AUTHENTICATE_FORM_ID,
        }
    }
}

impl fmt::Display for CeremonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provision => f.write_str("provision"),
            Self::Authenticate => f.write_str("authenticate"),
        }
    }
}

/// Authentication options as served by the authentication options endpoint.
///
/// Binary members are base64url strings. Members this crate does not
/// interpret are kept in `extra` so they reach the platform untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationOptions {
    pub challenge: String,
    #[serde(default)]
    pub allow_credentials: Vec<CredentialDescriptorJson>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CredentialDescriptorJson {
    /// base64url encoded credential id
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration options as served by the provisioning options endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegistrationOptions {
    pub challenge: String,
    pub user: UserEntityJson,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserEntityJson {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Assertion in the form posted to the authentication validate endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionJson {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    pub response: AssertionResponseJson,
    #[serde(rename = "type")]
    pub type_: String,
    /// Client extension results serialized as JSON text
    #[serde(rename = "assertionClientExtensions")]
    pub assertion_client_extensions: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionResponseJson {
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    #[serde(
        rename = "userHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_handle: Option<String>,
}

/// New credential in the form posted to the provisioning validate endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegistrationJson {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub response: AttestationResponseJson,
    /// Client extension results serialized as JSON text
    #[serde(rename = "registrationClientExtensions")]
    pub registration_client_extensions: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttestationResponseJson {
    #[serde(rename = "attestationObject")]
    pub attestation_object: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
}

/// Body of a `fail` member.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FailureDetail {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Reply of an options endpoint: either a failure marker or the options.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsResponse<T> {
    Failed(FailureDetail),
    Options(T),
}

impl<T: DeserializeOwned> OptionsResponse<T> {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if let Some(detail) = failure_of(&value) {
            return Ok(Self::Failed(detail));
        }
        Ok(Self::Options(serde_json::from_value(value)?))
    }
}

/// Reply of a validate endpoint.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidateStatus {
    Accepted { redirect_to: Option<String> },
    Rejected(FailureDetail),
}

impl ValidateStatus {
    pub fn from_value(value: &Value) -> Self {
        match failure_of(value) {
            Some(detail) => Self::Rejected(detail),
            None => Self::Accepted {
                redirect_to: value
                    .get("redirect_to")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
        }
    }
}

/// Extracts the `fail` member when it is present and truthy.
///
/// A `fail` that is present but not shaped like `{errors: [...]}` still counts
/// as a failure, with no errors attached.
fn failure_of(value: &Value) -> Option<FailureDetail> {
    let fail = value.get("fail")?;
    if !is_truthy(fail) {
        return None;
    }
    Some(serde_json::from_value(fail.clone()).unwrap_or_default())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
