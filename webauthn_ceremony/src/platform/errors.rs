use thiserror::Error;

/// Rejection raised by the platform credential API.
///
/// Mirrors the `DOMException` a browser rejects `navigator.credentials.create()`
/// or `navigator.credentials.get()` with: a `name` such as `NotAllowedError`
/// and a human readable `message`. Only the message is ever shown to users.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct PlatformError {
    /// Exception name reported by the platform
    pub name: String,
    /// Human readable description of the failure
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The user dismissed the prompt, or the operation timed out.
    pub fn not_allowed(message: impl Into<String>) -> Self {
        Self::new("NotAllowedError", message)
    }
}
