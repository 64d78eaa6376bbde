//! Provisioning and authentication ceremonies: option decoding, result
//! encoding and the submit-driven state machine tying them together.

mod config;
mod errors;
mod main;
mod types;

pub use errors::CeremonyError;

pub use main::{
    CeremonyOutcome, CeremonyServices, CeremonyState, WebAuthnCeremony, transform_assertion,
    transform_assertion_options, transform_credential, transform_credential_options,
};

pub use types::{
    AssertionJson, AssertionResponseJson, AttestationResponseJson, AuthenticationOptions,
    CeremonyKind, CredentialDescriptorJson, FailureDetail, OptionsResponse, RegistrationJson,
    RegistrationOptions, UserEntityJson, ValidateStatus,
};
