use super::options::transform_assertion_options;
use super::orchestrator::CeremonyServices;
use super::results::transform_assertion;
use super::state::{CeremonyState, StateCell};

use crate::ceremony::config::{AUTHENTICATE_OPTIONS_PATH, AUTHENTICATE_VALIDATE_PATH};
use crate::ceremony::errors::CeremonyError;
use crate::ceremony::types::{AuthenticationOptions, OptionsResponse, ValidateStatus};
use crate::transport::FormFields;

/// Signs in with an existing credential and returns the server's `redirect_to`.
///
/// The page's query string is forwarded to both endpoints. A `fail` from the
/// options endpoint ends the attempt with [`CeremonyError::OptionsFetchFailure`]
/// before the platform is involved.
pub(crate) async fn run_authenticate(
    services: &CeremonyServices,
    state: &StateCell,
    csrf_token: &str,
) -> Result<String, CeremonyError> {
    let search = services.location.search();

    let reply = services
        .transport
        .fetch_json(&format!("{}{}", *AUTHENTICATE_OPTIONS_PATH, search))
        .await?;
    let options = match OptionsResponse::<AuthenticationOptions>::from_value(reply)? {
        OptionsResponse::Options(options) => options,
        OptionsResponse::Failed(_) => return Err(CeremonyError::OptionsFetchFailure.log()),
    };

    let remember_device = services.ui.remember_device();
    let request = transform_assertion_options(options)?;

    state.set(CeremonyState::InvokingPlatform);
    let assertion = services.platform.get(request).await?;
    let credential = serde_json::to_string(&transform_assertion(assertion))?;

    state.set(CeremonyState::PostingResult);
    let mut form = FormFields::new();
    form.set("credential", credential);
    form.set("csrf_token", csrf_token);
    if remember_device {
        form.set("remember_device", "true");
    }

    let reply = services
        .transport
        .post_form(&format!("{}{}", *AUTHENTICATE_VALIDATE_PATH, search), form)
        .await?;

    match ValidateStatus::from_value(&reply) {
        ValidateStatus::Rejected(detail) => {
            Err(CeremonyError::ServerValidationFailure(detail.errors).log())
        }
        ValidateStatus::Accepted {
            redirect_to: Some(location),
        } => Ok(location),
        ValidateStatus::Accepted { redirect_to: None } => {
            Err(CeremonyError::MissingRedirect.log())
        }
    }
}
