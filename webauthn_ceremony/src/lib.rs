//! webauthn-ceremony - client-side WebAuthn ceremony orchestration
//!
//! This crate drives credential provisioning (registration) and authentication
//! ceremonies against a relying party's options and validate endpoints. It
//! transcodes between the server's base64url JSON and the byte buffers of the
//! platform credential API, and reports the outcome through a UI seam.

mod ceremony;
mod codec;
mod config;
mod platform;
mod transport;
mod ui;


pub use ceremony::{
    AssertionJson, AssertionResponseJson, AttestationResponseJson, AuthenticationOptions,
    CeremonyError, CeremonyKind, CeremonyOutcome, CeremonyServices, CeremonyState,
    CredentialDescriptorJson, FailureDetail, OptionsResponse, RegistrationJson,
    RegistrationOptions, UserEntityJson, ValidateStatus, WebAuthnCeremony, transform_assertion,
    transform_assertion_options, transform_credential, transform_credential_options,
};

pub use codec::{
    CodecError, decode_standard_base64, decode_url_safe_base64, encode_url_safe_base64,
    normalize_base64, string_to_bytes,
};

pub use platform::{
    AssertionCredential, AttestationCredential, AuthenticatorAssertionResponse,
    AuthenticatorAttestationResponse, PlatformError, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialDescriptor, PublicKeyCredentialRequestOptions,
    PublicKeyCredentialUserEntity, PublicKeyCredentials,
};

pub use transport::{CeremonyTransport, FormFields, HttpTransport, TransportError};

pub use ui::{
    AUTHENTICATE_FORM_ID, BROWSER_SUPPORT_ID, CEREMONY_BUTTON_ID, CeremonyUi,
    DISABLED_BUTTON_CLASS, Document, DocumentUi, ERRORS_LIST_ID, MemoryDocument, MemoryElement,
    MemoryLocation, PROVISION_FORM_ID, PROVISION_LABEL_ID, PageLocation, REMEMBER_DEVICE_ID,
    guard_webauthn,
};
