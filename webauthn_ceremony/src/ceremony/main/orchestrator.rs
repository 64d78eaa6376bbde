use std::sync::Arc;

use tokio::sync::watch;

use super::authenticate::run_authenticate;
use super::provision::run_provision;
use super::state::{CeremonyState, StateCell};

use crate::ceremony::config::LOGIN_PAGE_PATH;
use crate::ceremony::errors::CeremonyError;
use crate::ceremony::types::CeremonyKind;
use crate::platform::PublicKeyCredentials;
use crate::transport::CeremonyTransport;
use crate::ui::{CeremonyUi, PageLocation, guard_webauthn};

/// Collaborators a ceremony talks to.
#[derive(Clone)]
pub struct CeremonyServices {
    pub platform: Arc<dyn PublicKeyCredentials>,
    pub transport: Arc<dyn CeremonyTransport>,
    pub ui: Arc<dyn CeremonyUi>,
    pub location: Arc<dyn PageLocation>,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CeremonyOutcome {
    /// The server accepted the credential; the page navigated to `location`
    Completed { location: String },
    /// The login session was gone; the page navigated to the login page
    SessionExpired { location: String },
    /// The attempt failed and its errors were rendered
    Failed(CeremonyError),
    /// The submission was not accepted in the given state
    Ignored(CeremonyState),
}

/// Drives one ceremony form: arming, submission interception and the
/// options → platform → validate exchange.
///
/// At most one attempt runs at a time. A submission arriving while an attempt
/// is in flight is ignored; once an attempt has succeeded or failed the next
/// submission starts over.
pub struct WebAuthnCeremony {
    kind: CeremonyKind,
    services: CeremonyServices,
    state: StateCell,
}

impl WebAuthnCeremony {
    pub fn new(kind: CeremonyKind, services: CeremonyServices) -> Self {
        Self {
            kind,
            services,
            state: StateCell::new(),
        }
    }

    pub fn provision(services: CeremonyServices) -> Self {
        Self::new(CeremonyKind::Provision, services)
    }

    pub fn authenticate(services: CeremonyServices) -> Self {
        Self::new(CeremonyKind::Authenticate, services)
    }

    pub fn kind(&self) -> CeremonyKind {
        self.kind
    }

    pub fn state(&self) -> CeremonyState {
        self.state.current()
    }

    /// Watches state transitions of this ceremony.
    pub fn subscribe(&self) -> watch::Receiver<CeremonyState> {
        self.state.subscribe()
    }

    /// Prepares the form for submission.
    ///
    /// On a platform without public-key credentials the page is guarded and
    /// the ceremony becomes `Unsupported`. When the form or its submit control
    /// is missing the ceremony stays `Idle`.
    pub fn arm(&self) -> Result<(), CeremonyError> {
        if !self.services.platform.is_available() {
            guard_webauthn(self.services.platform.as_ref(), self.services.ui.as_ref());
            self.state.set(CeremonyState::Unsupported);
            return Err(CeremonyError::UnsupportedPlatform.log());
        }

        let form_id = self.kind.form_id();
        if !self.services.ui.enable_submit(form_id) {
            return Err(CeremonyError::FormNotFound(form_id.to_string()).log());
        }

        if self.state.current() == CeremonyState::Idle {
            self.state.set(CeremonyState::AwaitingSubmit);
        }
        tracing::debug!("{} ceremony armed on #{}", self.kind, form_id);
        Ok(())
    }

    /// Handles a submission of the ceremony's form.
    pub async fn submit(&self) -> CeremonyOutcome {
        let claim = match self.state.try_claim() {
            Ok(claim) => claim,
            Err(current) if current.is_in_flight() => {
                tracing::warn!(
                    "Ignoring {} submission while an attempt is {}",
                    self.kind,
                    current
                );
                return CeremonyOutcome::Ignored(current);
            }
            Err(current) => {
                tracing::warn!("Ignoring {} submission while ceremony is {}", self.kind, current);
                return CeremonyOutcome::Ignored(current);
            }
        };

        let result = match self.csrf_token() {
            Ok(csrf_token) => match self.kind {
                CeremonyKind::Provision => {
                    run_provision(&self.services, &self.state, &csrf_token).await
                }
                CeremonyKind::Authenticate => {
                    run_authenticate(&self.services, &self.state, &csrf_token).await
                }
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(location) => {
                claim.finish(CeremonyState::Succeeded);
                tracing::info!("{} ceremony succeeded, navigating to {}", self.kind, location);
                self.services.location.replace(&location);
                CeremonyOutcome::Completed { location }
            }
            Err(CeremonyError::OptionsFetchFailure) => {
                let location = LOGIN_PAGE_PATH.clone();
                claim.finish(CeremonyState::Failed);
                tracing::info!("Login session expired, navigating to {}", location);
                self.services.location.replace(&location);
                CeremonyOutcome::SessionExpired { location }
            }
            Err(err) => {
                self.services.ui.render_errors(&err.messages());
                claim.finish(CeremonyState::Failed);
                tracing::info!("{} ceremony failed: {}", self.kind, err);
                CeremonyOutcome::Failed(err)
            }
        }
    }

    fn csrf_token(&self) -> Result<String, CeremonyError> {
        let form_id = self.kind.form_id();
        self.services
            .ui
            .submit_value(form_id)
            .ok_or_else(|| CeremonyError::FormNotFound(form_id.to_string()).log())
    }
}
