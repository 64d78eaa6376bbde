use thiserror::Error;

use crate::codec::CodecError;
use crate::platform::PlatformError;
use crate::transport::TransportError;

/// Errors that end a ceremony attempt.
///
/// None of these escape [`crate::WebAuthnCeremony::submit`]: each is either
/// rendered into the error region or turned into a navigation, and reported
/// back through [`crate::CeremonyOutcome`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CeremonyError {
    /// The platform has no public-key credential support; the ceremony never arms
    #[error("WebAuthn is not supported by this platform")]
    UnsupportedPlatform,

    /// The ceremony's form (or its submit control) is missing from the page
    #[error("Form not found: {0}")]
    FormNotFound(String),

    /// The authentication options endpoint answered with `fail`, meaning the
    /// login session is gone
    #[error("Authentication options request failed; session is no longer valid")]
    OptionsFetchFailure,

    /// The platform rejected the credential operation (cancelled, timed out, ...)
    #[error("Platform rejected the request: {0}")]
    PlatformRejection(PlatformError),

    /// The server reported errors through `fail.errors`
    #[error("Validation failed: {}", .0.join("; "))]
    ServerValidationFailure(Vec<String>),

    /// Authentication succeeded but the server named no place to go
    #[error("Server response is missing redirect_to")]
    MissingRedirect,

    #[error("Transport error: {0}")]
    Transport(TransportError),

    #[error("Codec error: {0}")]
    Codec(CodecError),

    /// Error converting between data formats using Serde
    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),
}

impl CeremonyError {
    /// Human-readable errors to present for this failure.
    ///
    /// A platform rejection contributes only its message, server validation
    /// errors are passed on verbatim, and everything else is presented as its
    /// display text.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::PlatformRejection(err) => vec![err.message.clone()],
            Self::ServerValidationFailure(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::UnsupportedPlatform => tracing::info!("{}", self),
            Self::OptionsFetchFailure => tracing::warn!("{}", self),
            Self::PlatformRejection(err) => tracing::warn!("Platform rejection: {}", err),
            Self::ServerValidationFailure(errors) => {
                tracing::warn!("Server validation failed: {:?}", errors)
            }
            other => tracing::error!("{}", other),
        }
        self
    }
}

impl From<PlatformError> for CeremonyError {
    fn from(err: PlatformError) -> Self {
        let error = Self::PlatformRejection(err);
        tracing::warn!("{}", error);
        error
    }
}

impl From<TransportError> for CeremonyError {
    fn from(err: TransportError) -> Self {
        let error = Self::Transport(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<CodecError> for CeremonyError {
    fn from(err: CodecError) -> Self {
        let error = Self::Codec(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<serde_json::Error> for CeremonyError {
    fn from(err: serde_json::Error) -> Self {
        let error = Self::Serde(err.to_string());
        tracing::error!("{}", error);
        error
    }
}
