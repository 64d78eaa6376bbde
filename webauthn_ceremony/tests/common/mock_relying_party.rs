//! Axum-based mock relying party serving the options and validate endpoints
//!
//! Each test starts its own server on an ephemeral port, scripts the replies it
//! needs, and inspects what the ceremony sent afterwards.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};

pub const PROVISION_OPTIONS_PATH: &str = "/manage/account/webauthn-provision/options";
pub const PROVISION_VALIDATE_PATH: &str = "/manage/account/webauthn-provision/validate";
pub const AUTHENTICATE_OPTIONS_PATH: &str = "/account/webauthn-authenticate/options";
pub const AUTHENTICATE_VALIDATE_PATH: &str = "/account/webauthn-authenticate/validate";

/// Cookie handed out by the options endpoints
pub const SESSION_COOKIE: &str = "webauthn_state=challenge-state-1";

/// A request as the mock relying party saw it
#[derive(Clone, Debug, Default)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub cache_control: Option<String>,
    pub cookie: Option<String>,
    pub fields: BTreeMap<String, String>,
}

/// Shared state for the mock server
#[derive(Clone, Default)]
pub struct RelyingPartyState {
    replies: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl RelyingPartyState {
    fn reply_for(&self, path: &str) -> (StatusCode, Value) {
        self.replies
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| (StatusCode::NOT_FOUND, json!({"error": "not scripted"})))
    }

    fn record(&self, method: &str, uri: &Uri, headers: &HeaderMap, fields: BTreeMap<String, String>) {
        let header_text = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(ReceivedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            cache_control: header_text(header::CACHE_CONTROL),
            cookie: header_text(header::COOKIE),
            fields,
        });
    }
}

/// Running mock relying party
pub struct MockRelyingParty {
    pub origin: String,
    state: RelyingPartyState,
    handle: JoinHandle<()>,
}

impl MockRelyingParty {
    pub async fn start() -> Self {
        let state = RelyingPartyState::default();
        let app = Router::new()
            .route(PROVISION_OPTIONS_PATH, get(options))
            .route(PROVISION_VALIDATE_PATH, post(validate))
            .route(AUTHENTICATE_OPTIONS_PATH, get(options))
            .route(AUTHENTICATE_VALIDATE_PATH, post(validate))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock relying party");
        let addr = listener.local_addr().expect("No local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock relying party stopped");
        });

        Self {
            origin: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Answers requests to `path` with `body` and status 200
    pub fn reply(&self, path: &str, body: Value) -> &Self {
        self.reply_with_status(path, StatusCode::OK, body)
    }

    pub fn reply_with_status(&self, path: &str, status: StatusCode, body: Value) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<ReceivedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }
}

impl Drop for MockRelyingParty {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn options(
    State(state): State<RelyingPartyState>,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record("GET", &uri, &headers, BTreeMap::new());
    let (status, body) = state.reply_for(uri.path());
    (
        status,
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
        Json(body),
    )
}

async fn validate(
    State(state): State<RelyingPartyState>,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut fields = BTreeMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        fields.insert(name, value);
    }
    state.record("POST", &uri, &headers, fields);
    let (status, body) = state.reply_for(uri.path());
    (status, Json(body))
}
