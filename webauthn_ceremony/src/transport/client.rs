use async_trait::async_trait;
use http::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{CeremonyTransport, FormFields, TransportError};
use crate::config::{ORIGIN, WEBAUTHN_HTTP_TIMEOUT};

/// [`CeremonyTransport`] over HTTP(S) with reqwest.
///
/// The client is configured with the following settings:
///
/// - a cookie store, so cookies set by the options endpoint (session,
///   challenge state) are sent back to the validate endpoint just as a
///   browser does for same-origin `credentials`.
/// - `Cache-Control: no-cache` and `Pragma: no-cache` on every request.
/// - `timeout`: `WEBAUTHN_HTTP_TIMEOUT` seconds (default 30).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    origin: Url,
}

impl HttpTransport {
    /// Creates a transport for `origin` (scheme, host and optional port).
    pub fn new(origin: &str) -> Result<Self, TransportError> {
        let origin = Url::parse(origin)?;
        if origin.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(format!(
                "Origin cannot be a base URL: {origin}"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*WEBAUTHN_HTTP_TIMEOUT))
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        tracing::debug!("HTTP transport for origin {}", origin);

        Ok(Self { client, origin })
    }

    /// Creates a transport for the `ORIGIN` environment variable.
    pub fn from_env() -> Result<Self, TransportError> {
        let origin = ORIGIN
            .as_deref()
            .ok_or_else(|| TransportError::Config("ORIGIN must be set".to_string()))?;
        Self::new(origin)
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolves an origin-relative path, refusing anything that leaves the origin.
    pub(crate) fn resolve(&self, path_and_query: &str) -> Result<Url, TransportError> {
        let url = self.origin.join(path_and_query)?;
        if url.origin() != self.origin.origin() {
            return Err(TransportError::CrossOrigin(url.to_string()));
        }
        Ok(url)
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, TransportError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!("Ceremony endpoint answered with status {}", status);
    }

    serde_json::from_str(&body).map_err(|e| TransportError::Body {
        status: status.as_u16(),
        message: e.to_string(),
    })
}

#[async_trait]
impl CeremonyTransport for HttpTransport {
    async fn fetch_json(&self, path_and_query: &str) -> Result<Value, TransportError> {
        let url = self.resolve(path_and_query)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn post_form(
        &self,
        path_and_query: &str,
        form: FormFields,
    ) -> Result<Value, TransportError> {
        let url = self.resolve(path_and_query)?;
        tracing::debug!("POST {} ({} fields)", url, form.len());

        let multipart = form
            .iter()
            .fold(reqwest::multipart::Form::new(), |multipart, (name, value)| {
                multipart.text(name.to_string(), value.to_string())
            });

        let response = self.client.post(url).multipart(multipart).send().await?;
        read_json(response).await
    }
}
