use serde_json::{Map, Value};

/// Options handed to the platform's credential retrieval operation.
///
/// Binary members are raw bytes; every member the server sent that this crate
/// does not interpret (`timeout`, `rpId`, `userVerification`, ...) is kept in
/// `extra` exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialRequestOptions {
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<PublicKeyCredentialDescriptor>,
    pub extra: Map<String, Value>,
}

/// A credential the platform may use, identified by its raw id.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialDescriptor {
    pub id: Vec<u8>,
    pub type_: String,
    /// Other descriptor members such as `transports`
    pub extra: Map<String, Value>,
}

/// Options handed to the platform's credential creation operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialCreationOptions {
    pub challenge: Vec<u8>,
    pub user: PublicKeyCredentialUserEntity,
    /// `rp`, `pubKeyCredParams`, `timeout`, `authenticatorSelection`, ...
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialUserEntity {
    pub id: Vec<u8>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub extra: Map<String, Value>,
}

/// Result of a successful credential retrieval (an assertion).
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionCredential {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub type_: String,
    pub response: AuthenticatorAssertionResponse,
    /// Opaque client extension outputs; structured data, not binary
    pub client_extension_results: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatorAssertionResponse {
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// Result of a successful credential creation.
#[derive(Debug, Clone, PartialEq)]
pub struct AttestationCredential {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub type_: String,
    pub response: AuthenticatorAttestationResponse,
    pub client_extension_results: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatorAttestationResponse {
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
}
