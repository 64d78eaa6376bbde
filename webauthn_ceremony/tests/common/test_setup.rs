//! Shared setup: environment, tracing and a page wired to a live transport

use std::sync::{Arc, Once};
use webauthn_ceremony::{
    AUTHENTICATE_FORM_ID, BROWSER_SUPPORT_ID, CEREMONY_BUTTON_ID, CeremonyServices, DocumentUi,
    ERRORS_LIST_ID, HttpTransport, MemoryDocument, MemoryElement, MemoryLocation,
    PROVISION_FORM_ID, PROVISION_LABEL_ID, PublicKeyCredentials, REMEMBER_DEVICE_ID,
};

use super::mock_relying_party::MockRelyingParty;

pub const PROVISION_CSRF: &str = "csrf-provision-token";
pub const AUTHENTICATE_CSRF: &str = "csrf-auth-token";

/// Load .env_test and install a test tracing subscriber, once per test binary
pub fn init_test_environment() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if let Err(e) = dotenvy::from_filename(".env_test") {
            println!("Warning: Could not load .env_test file: {e}");
        }
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A page with both ceremony forms, the error list and the guard targets
pub fn ceremony_page(remember_device: bool) -> MemoryDocument {
    let document = MemoryDocument::new();
    document.insert(ERRORS_LIST_ID, MemoryElement::new("ul"));
    document.insert(
        CEREMONY_BUTTON_ID,
        MemoryElement::new("a").with_class("button"),
    );
    document.insert(
        BROWSER_SUPPORT_ID,
        MemoryElement::new("div").with_display("none"),
    );
    document.insert(PROVISION_FORM_ID, MemoryElement::new("form"));
    document.insert(
        PROVISION_LABEL_ID,
        MemoryElement::new("input").with_value("Work YubiKey"),
    );
    document.insert(
        "provision-submit",
        MemoryElement::submit_button(PROVISION_FORM_ID, PROVISION_CSRF),
    );
    document.insert(AUTHENTICATE_FORM_ID, MemoryElement::new("form"));
    document.insert(REMEMBER_DEVICE_ID, MemoryElement::checkbox(remember_device));
    document.insert(
        "auth-submit",
        MemoryElement::submit_button(AUTHENTICATE_FORM_ID, AUTHENTICATE_CSRF),
    );
    document
}

/// Page-side handles of one test
pub struct Browser {
    pub ui: Arc<DocumentUi<MemoryDocument>>,
    pub location: Arc<MemoryLocation>,
    pub services: CeremonyServices,
}

impl Browser {
    pub fn open(
        server: &MockRelyingParty,
        platform: Arc<dyn PublicKeyCredentials>,
        search: &str,
        remember_device: bool,
    ) -> Self {
        init_test_environment();
        let transport = HttpTransport::new(&server.origin).expect("Failed to create transport");
        let ui = Arc::new(DocumentUi::new(ceremony_page(remember_device)));
        let location = Arc::new(MemoryLocation::new(search));
        let services = CeremonyServices {
            platform,
            transport: Arc::new(transport),
            ui: ui.clone(),
            location: location.clone(),
        };
        Self {
            ui,
            location,
            services,
        }
    }

    pub fn rendered_errors(&self) -> Vec<String> {
        self.ui
            .document()
            .element(ERRORS_LIST_ID)
            .map(|list| list.items)
            .unwrap_or_default()
    }
}
