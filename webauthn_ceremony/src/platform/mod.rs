//! The platform public-key-credential API as seen by a ceremony.

mod errors;
mod types;

use async_trait::async_trait;

pub use errors::PlatformError;
pub use types::{
    AssertionCredential, AttestationCredential, AuthenticatorAssertionResponse,
    AuthenticatorAttestationResponse, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialDescriptor, PublicKeyCredentialRequestOptions,
    PublicKeyCredentialUserEntity,
};

/// Access to the platform's credential creation and retrieval operations.
///
/// In a browser this is `navigator.credentials` restricted to the `publicKey`
/// member. Implementations surface user cancellation, timeouts and platform
/// failures as a [`PlatformError`]; there is no separate cancellation signal.
#[async_trait]
pub trait PublicKeyCredentials: Send + Sync {
    /// Whether the platform exposes public-key credentials at all
    /// (`window.PublicKeyCredential` in a browser).
    fn is_available(&self) -> bool;

    /// Creates a new credential (registration).
    async fn create(
        &self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<AttestationCredential, PlatformError>;

    /// Produces an assertion with an existing credential (authentication).
    async fn get(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AssertionCredential, PlatformError>;
}
