mod authenticate;
mod options;
mod orchestrator;
mod provision;
mod results;
mod state;

pub use options::{transform_assertion_options, transform_credential_options};
pub use orchestrator::{CeremonyOutcome, CeremonyServices, WebAuthnCeremony};
pub use results::{transform_assertion, transform_credential};
pub use state::CeremonyState;
