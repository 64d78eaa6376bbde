use super::{
    BROWSER_SUPPORT_ID, CEREMONY_BUTTON_ID, CeremonyUi, DISABLED_BUTTON_CLASS, ERRORS_LIST_ID,
    PROVISION_LABEL_ID, REMEMBER_DEVICE_ID,
};

/// Id-addressed view of a page's elements.
///
/// Mutations on ids that do not exist are silently ignored.
pub trait Document: Send + Sync {
    fn contains(&self, id: &str) -> bool;

    /// Adds `class` to the element's class list unless already present.
    fn add_class(&self, id: &str, class: &str);

    fn set_style_display(&self, id: &str, display: &str);

    fn set_disabled(&self, id: &str, disabled: bool);

    fn set_attribute(&self, id: &str, name: &str, value: &str);

    /// Appends a list item holding `text` as a text node (never as markup).
    fn append_list_item(&self, id: &str, text: &str);

    /// Current value of an input or button.
    fn value(&self, id: &str) -> Option<String>;

    /// Checked state of a checkbox.
    fn is_checked(&self, id: &str) -> Option<bool>;

    /// Id of the submit-type control inside form `form_id`.
    fn submit_control(&self, form_id: &str) -> Option<String>;
}

/// [`CeremonyUi`] adapter over a [`Document`], using the fixed element ids.
#[derive(Debug, Default)]
pub struct DocumentUi<D> {
    document: D,
}

impl<D: Document> DocumentUi<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }
}

impl<D: Document> CeremonyUi for DocumentUi<D> {
    fn disable_ceremony_button(&self) {
        self.document.add_class(CEREMONY_BUTTON_ID, DISABLED_BUTTON_CLASS);
    }

    fn reveal_unsupported_warning(&self) {
        self.document.set_style_display(BROWSER_SUPPORT_ID, "block");
    }

    fn disable_label_input(&self) {
        self.document.set_disabled(PROVISION_LABEL_ID, true);
    }

    fn render_errors(&self, errors: &[String]) {
        if !self.document.contains(ERRORS_LIST_ID) {
            tracing::debug!("No error list on page; dropping {} error(s)", errors.len());
            return;
        }

        // The alert role interrupts screen readers, so only set it with content.
        if errors.is_empty() {
            return;
        }
        self.document.set_attribute(ERRORS_LIST_ID, "role", "alert");

        for error in errors {
            self.document.append_list_item(ERRORS_LIST_ID, error);
        }
    }

    fn enable_submit(&self, form_id: &str) -> bool {
        if !self.document.contains(form_id) {
            return false;
        }
        match self.document.submit_control(form_id) {
            Some(control) => {
                self.document.set_disabled(&control, false);
                true
            }
            None => false,
        }
    }

    fn submit_value(&self, form_id: &str) -> Option<String> {
        let control = self.document.submit_control(form_id)?;
        self.document.value(&control)
    }

    fn provision_label(&self) -> String {
        self.document.value(PROVISION_LABEL_ID).unwrap_or_default()
    }

    fn remember_device(&self) -> bool {
        self.document.is_checked(REMEMBER_DEVICE_ID).unwrap_or(false)
    }
}
