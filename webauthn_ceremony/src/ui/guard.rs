use super::CeremonyUi;
use crate::platform::PublicKeyCredentials;

/// Disables ceremony-dependent UI when the platform lacks public-key credentials.
///
/// Styles the ceremony button as disabled, reveals the browser-support warning
/// and disables the provisioning label input. Does nothing on capable
/// platforms; calling it repeatedly leaves the page in the same state.
pub fn guard_webauthn(platform: &dyn PublicKeyCredentials, ui: &dyn CeremonyUi) {
    if platform.is_available() {
        return;
    }

    tracing::info!("Public key credentials unavailable; disabling WebAuthn controls");

    ui.disable_ceremony_button();
    ui.reveal_unsupported_warning();
    ui.disable_label_input();
}
