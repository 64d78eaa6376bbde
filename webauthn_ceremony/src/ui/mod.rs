//! UI feedback for ceremonies: capability guard, error presentation and navigation.

mod document;
mod guard;
mod memory;

pub use document::{Document, DocumentUi};
pub use guard::guard_webauthn;
pub use memory::{MemoryDocument, MemoryElement, MemoryLocation};

/// List container receiving one item per error
pub const ERRORS_LIST_ID: &str = "webauthn-errors";
/// Button that starts a ceremony, styled disabled on unsupported platforms
pub const CEREMONY_BUTTON_ID: &str = "webauthn-button";
/// Warning region shown on unsupported platforms
pub const BROWSER_SUPPORT_ID: &str = "webauthn-browser-support";
/// Text input holding the label of a credential being provisioned
pub const PROVISION_LABEL_ID: &str = "webauthn-provision-label";
pub const PROVISION_FORM_ID: &str = "webauthn-provision-form";
pub const AUTHENTICATE_FORM_ID: &str = "webauthn-auth-form";
/// Checkbox asking to remember the device after authentication
pub const REMEMBER_DEVICE_ID: &str = "remember_device_webauthn";

/// Class marking the ceremony button as disabled
pub const DISABLED_BUTTON_CLASS: &str = "button--disabled";

/// Side-effecting UI capabilities a ceremony needs from the hosting page.
///
/// Keeps the orchestrator free of direct document access; [`DocumentUi`] is the
/// adapter implementing it over a [`Document`].
pub trait CeremonyUi: Send + Sync {
    /// Styles the ceremony button as disabled.
    fn disable_ceremony_button(&self);

    /// Makes the unsupported-platform warning visible.
    fn reveal_unsupported_warning(&self);

    /// Disables the provisioning label input.
    fn disable_label_input(&self);

    /// Appends `errors` to the error region. Previously rendered errors stay.
    fn render_errors(&self, errors: &[String]);

    /// Enables the submit control of `form_id`.
    ///
    /// Returns `false` when the form or its submit control does not exist.
    fn enable_submit(&self, form_id: &str) -> bool;

    /// Value carried by the submit control of `form_id` (the CSRF token).
    fn submit_value(&self, form_id: &str) -> Option<String>;

    /// Label typed in for the credential being provisioned.
    fn provision_label(&self) -> String;

    /// Whether the remember-device checkbox is checked.
    fn remember_device(&self) -> bool;
}

/// The page's location.
pub trait PageLocation: Send + Sync {
    /// Query string of the current page including the leading `?`, or empty.
    fn search(&self) -> String;

    /// Navigates to `location`, replacing the current history entry.
    fn replace(&self, location: &str);
}
