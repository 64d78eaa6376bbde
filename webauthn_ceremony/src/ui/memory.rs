use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Document, PageLocation};

/// State of one element held by a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Inline `style.display`, when set
    pub display: Option<String>,
    pub disabled: bool,
    pub value: String,
    pub checked: bool,
    /// Id of the form owning this element
    pub form: Option<String>,
    /// Whether this is a submit-type control
    pub submit: bool,
    /// Text of appended list items, in order
    pub items: Vec<String>,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// A disabled submit button inside `form_id` carrying `value`.
    pub fn submit_button(form_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: "button".to_string(),
            disabled: true,
            value: value.into(),
            form: Some(form_id.into()),
            submit: true,
            ..Self::default()
        }
        .with_attribute("type", "submit")
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            tag: "input".to_string(),
            checked,
            ..Self::default()
        }
        .with_attribute("type", "checkbox")
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// In-memory [`Document`] for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Mutex<BTreeMap<String, MemoryElement>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the element with `id`.
    pub fn insert(&self, id: impl Into<String>, element: MemoryElement) {
        self.elements().insert(id.into(), element);
    }

    /// Snapshot of the element with `id`.
    pub fn element(&self, id: &str) -> Option<MemoryElement> {
        self.elements().get(id).cloned()
    }

    /// Serializes the element with `id` and its list items as HTML, escaping text.
    pub fn to_html(&self, id: &str) -> Option<String> {
        let elements = self.elements();
        let element = elements.get(id)?;

        let mut html = format!("<{} id=\"{}\"", element.tag, escape_html(id));
        if !element.classes.is_empty() {
            html.push_str(&format!(
                " class=\"{}\"",
                escape_html(&element.classes.join(" "))
            ));
        }
        for (name, value) in &element.attributes {
            html.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        html.push('>');
        for item in &element.items {
            html.push_str(&format!("<li>{}</li>", escape_html(item)));
        }
        html.push_str(&format!("</{}>", element.tag));
        Some(html)
    }

    fn elements(&self) -> MutexGuard<'_, BTreeMap<String, MemoryElement>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut MemoryElement)) {
        if let Some(element) = self.elements().get_mut(id) {
            f(element);
        }
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements().contains_key(id)
    }

    fn add_class(&self, id: &str, class: &str) {
        self.with_element(id, |element| {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        });
    }

    fn set_style_display(&self, id: &str, display: &str) {
        self.with_element(id, |element| element.display = Some(display.to_string()));
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        self.with_element(id, |element| element.disabled = disabled);
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.with_element(id, |element| {
            element.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn append_list_item(&self, id: &str, text: &str) {
        self.with_element(id, |element| element.items.push(text.to_string()));
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements().get(id).map(|element| element.value.clone())
    }

    fn is_checked(&self, id: &str) -> Option<bool> {
        self.elements().get(id).map(|element| element.checked)
    }

    fn submit_control(&self, form_id: &str) -> Option<String> {
        self.elements()
            .iter()
            .find(|(_, element)| element.submit && element.form.as_deref() == Some(form_id))
            .map(|(id, _)| id.clone())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// In-memory [`PageLocation`] recording every navigation.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    search: String,
    replaced: Mutex<Vec<String>>,
}

impl MemoryLocation {
    /// A location whose query string is `search` (e.g. `?next=/manage`).
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replaced: Mutex::new(Vec::new()),
        }
    }

    /// Every location navigated to, oldest first.
    pub fn replaced(&self) -> Vec<String> {
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent navigation target.
    pub fn current(&self) -> Option<String> {
        self.replaced().last().cloned()
    }
}

impl PageLocation for MemoryLocation {
    fn search(&self) -> String {
        self.search.clone()
    }

    fn replace(&self, location: &str) {
        tracing::debug!("Navigating to {}", location);
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}
