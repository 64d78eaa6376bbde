//! Request/response contracts with the options and validate endpoints.

mod client;
mod errors;

use async_trait::async_trait;
use serde_json::Value;

pub use client::HttpTransport;
pub use errors::TransportError;

/// Transport used by ceremonies to reach the server.
///
/// Paths are origin-relative and may carry a query string. Implementations
/// must keep requests same-origin, bypass caches and send the page's
/// credentials (cookies) along. Response bodies are returned as JSON whatever
/// the HTTP status, because the server reports validation failures in the
/// body.
#[async_trait]
pub trait CeremonyTransport: Send + Sync {
    /// `GET` a JSON document.
    async fn fetch_json(&self, path_and_query: &str) -> Result<Value, TransportError>;

    /// `POST` a multipart form and read the JSON reply.
    async fn post_form(
        &self,
        path_and_query: &str,
        form: FormFields,
    ) -> Result<Value, TransportError>;
}

/// Ordered text fields of a multipart form body.
///
/// [`FormFields::set`] replaces an existing field of the same name, like
/// `FormData.set()` does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(field) => field.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
