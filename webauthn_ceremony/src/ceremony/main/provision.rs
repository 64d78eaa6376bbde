use super::options::transform_credential_options;
use super::orchestrator::CeremonyServices;
use super::results::transform_credential;
use super::state::{CeremonyState, StateCell};

use crate::ceremony::config::{ACCOUNT_PAGE_PATH, PROVISION_OPTIONS_PATH, PROVISION_VALIDATE_PATH};
use crate::ceremony::errors::CeremonyError;
use crate::ceremony::types::{OptionsResponse, RegistrationOptions, ValidateStatus};
use crate::transport::FormFields;

/// Registers a new credential and returns where to navigate on success.
pub(crate) async fn run_provision(
    services: &CeremonyServices,
    state: &StateCell,
    csrf_token: &str,
) -> Result<String, CeremonyError> {
    let label = services.ui.provision_label();

    let reply = services
        .transport
        .fetch_json(PROVISION_OPTIONS_PATH.as_str())
        .await?;
    let options = match OptionsResponse::<RegistrationOptions>::from_value(reply)? {
        OptionsResponse::Options(options) => options,
        OptionsResponse::Failed(detail) => {
            return Err(CeremonyError::ServerValidationFailure(detail.errors).log());
        }
    };

    state.set(CeremonyState::InvokingPlatform);
    let credential = services
        .platform
        .create(transform_credential_options(options))
        .await?;
    let credential = serde_json::to_string(&transform_credential(credential))?;

    state.set(CeremonyState::PostingResult);
    let mut form = FormFields::new();
    form.set("label", label);
    form.set("credential", credential);
    form.set("csrf_token", csrf_token);

    let reply = services
        .transport
        .post_form(PROVISION_VALIDATE_PATH.as_str(), form)
        .await?;

    match ValidateStatus::from_value(&reply) {
        ValidateStatus::Rejected(detail) => {
            Err(CeremonyError::ServerValidationFailure(detail.errors).log())
        }
        ValidateStatus::Accepted { .. } => Ok(ACCOUNT_PAGE_PATH.clone()),
    }
}
