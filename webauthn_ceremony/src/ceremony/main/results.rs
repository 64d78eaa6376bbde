use serde_json::{Map, Value};

use crate::ceremony::types::{
    AssertionJson, AssertionResponseJson, AttestationResponseJson, RegistrationJson,
};
use crate::codec::encode_url_safe_base64;
use crate::platform::{AssertionCredential, AttestationCredential};

/// Re-encodes an assertion for the authentication validate endpoint.
pub fn transform_assertion(credential: AssertionCredential) -> AssertionJson {
    let response = credential.response;
    AssertionJson {
        id: credential.id,
        raw_id: encode_url_safe_base64(&credential.raw_id),
        response: AssertionResponseJson {
            authenticator_data: encode_url_safe_base64(&response.authenticator_data),
            client_data_json: encode_url_safe_base64(&response.client_data_json),
            signature: encode_url_safe_base64(&response.signature),
            user_handle: response.user_handle.as_deref().map(encode_url_safe_base64),
        },
        type_: credential.type_,
        assertion_client_extensions: extensions_to_text(credential.client_extension_results),
    }
}

/// Re-encodes a freshly created credential for the provisioning validate endpoint.
pub fn transform_credential(credential: AttestationCredential) -> RegistrationJson {
    let response = credential.response;
    RegistrationJson {
        id: credential.id,
        raw_id: encode_url_safe_base64(&credential.raw_id),
        type_: credential.type_,
        response: AttestationResponseJson {
            attestation_object: encode_url_safe_base64(&response.attestation_object),
            client_data_json: encode_url_safe_base64(&response.client_data_json),
        },
        registration_client_extensions: extensions_to_text(credential.client_extension_results),
    }
}

fn extensions_to_text(extensions: Map<String, Value>) -> String {
    Value::Object(extensions).to_string()
}
