use crate::common::mock_relying_party::{
    PROVISION_OPTIONS_PATH, PROVISION_VALIDATE_PATH, SESSION_COOKIE,
};
use crate::common::test_setup::PROVISION_CSRF;
use crate::common::{Browser, FakeAuthenticator, MockRelyingParty};
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use webauthn_ceremony::{
    BROWSER_SUPPORT_ID, CeremonyError, CeremonyOutcome, CeremonyState, PlatformError,
    WebAuthnCeremony,
};

fn registration_options() -> Value {
    json!({
        "challenge": "AAA_",
        "rp": {"name": "Example", "id": "127.0.0.1"},
        "user": {"id": "user-1", "name": "alice@example.com", "displayName": "Alice"},
        "pubKeyCredParams": [{"type": "public-key", "alg": -7}, {"type": "public-key", "alg": -257}],
        "timeout": 60000,
        "attestation": "none",
        "authenticatorSelection": {"residentKey": "preferred", "userVerification": "preferred"}
    })
}

/// Test a successful registration posts the encoded credential and lands on the account page
#[tokio::test]
async fn test_provision_success() {
    let server = MockRelyingParty::start().await;
    server
        .reply(PROVISION_OPTIONS_PATH, registration_options())
        .reply(PROVISION_VALIDATE_PATH, json!({}));

    let authenticator = Arc::new(FakeAuthenticator::new());
    let browser = Browser::open(&server, authenticator.clone(), "", false);
    let ceremony = WebAuthnCeremony::provision(browser.services.clone());
    ceremony.arm().unwrap();

    let outcome = ceremony.submit().await;
    assert_eq!(
        outcome,
        CeremonyOutcome::Completed {
            location: "/manage/account".to_string()
        }
    );
    assert_eq!(ceremony.state(), CeremonyState::Succeeded);
    assert_eq!(browser.location.replaced(), vec!["/manage/account"]);
    assert!(browser.rendered_errors().is_empty());

    // The authenticator got the challenge and user handle character by character
    let seen = authenticator.seen_creation.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].challenge, b"AAA_".to_vec());
    assert_eq!(seen[0].user.id, b"user-1".to_vec());
    assert_eq!(seen[0].extra["attestation"], "none");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.cache_control.as_deref(), Some("no-cache"));
    }

    let post = &requests[1];
    assert_eq!(post.path, PROVISION_VALIDATE_PATH);
    assert_eq!(post.cookie.as_deref(), Some(SESSION_COOKIE));
    assert_eq!(post.fields["label"], "Work YubiKey");
    assert_eq!(post.fields["csrf_token"], PROVISION_CSRF);

    let credential: Value = serde_json::from_str(&post.fields["credential"]).unwrap();
    assert_eq!(credential["id"], "bmV3LWNyZWQ");
    assert_eq!(credential["rawId"], "bmV3LWNyZWQ");
    assert_eq!(credential["type"], "public-key");
    assert_eq!(
        credential["registrationClientExtensions"],
        r#"{"credProps":{"rk":true}}"#
    );

    let client_data = webauthn_ceremony::decode_url_safe_base64(
        credential["response"]["clientDataJSON"].as_str().unwrap(),
    )
    .unwrap();
    let client_data: Value = serde_json::from_slice(&client_data).unwrap();
    assert_eq!(client_data["type"], "webauthn.create");
}

/// Test validation errors are rendered in order and the page stays put
#[tokio::test]
async fn test_provision_rejected_by_server() {
    let server = MockRelyingParty::start().await;
    server
        .reply(PROVISION_OPTIONS_PATH, registration_options())
        .reply_with_status(
            PROVISION_VALIDATE_PATH,
            StatusCode::BAD_REQUEST,
            json!({"fail": {"errors": ["label already in use", "choose another label"]}}),
        );

    let browser = Browser::open(&server, Arc::new(FakeAuthenticator::new()), "", false);
    let ceremony = WebAuthnCeremony::provision(browser.services.clone());
    ceremony.arm().unwrap();

    let outcome = ceremony.submit().await;
    assert_eq!(
        outcome,
        CeremonyOutcome::Failed(CeremonyError::ServerValidationFailure(vec![
            "label already in use".to_string(),
            "choose another label".to_string(),
        ]))
    );
    assert_eq!(
        browser.rendered_errors(),
        vec!["label already in use", "choose another label"]
    );
    let errors_html = browser.ui.document().to_html("webauthn-errors").unwrap();
    assert!(errors_html.contains("role=\"alert\""));
    assert!(browser.location.replaced().is_empty());
    assert_eq!(ceremony.state(), CeremonyState::Failed);
}

/// Test a cancelled registration shows the platform's message and posts nothing
#[tokio::test]
async fn test_provision_cancelled() {
    let server = MockRelyingParty::start().await;
    server.reply(PROVISION_OPTIONS_PATH, registration_options());

    let authenticator = Arc::new(FakeAuthenticator::rejecting(PlatformError::not_allowed(
        "The operation either timed out or was not allowed.",
    )));
    let browser = Browser::open(&server, authenticator, "", false);
    let ceremony = WebAuthnCeremony::provision(browser.services.clone());
    ceremony.arm().unwrap();

    let outcome = ceremony.submit().await;
    assert!(matches!(
        outcome,
        CeremonyOutcome::Failed(CeremonyError::PlatformRejection(_))
    ));
    assert_eq!(
        browser.rendered_errors(),
        vec!["The operation either timed out or was not allowed."]
    );
    assert!(server.posted().is_empty());
}

/// Test an unsupported browser never arms and never talks to the server
#[tokio::test]
async fn test_provision_unsupported_browser() {
    let server = MockRelyingParty::start().await;
    let browser = Browser::open(&server, Arc::new(FakeAuthenticator::unavailable()), "", false);
    let ceremony = WebAuthnCeremony::provision(browser.services.clone());

    assert_eq!(ceremony.arm(), Err(CeremonyError::UnsupportedPlatform));
    assert_eq!(
        ceremony.submit().await,
        CeremonyOutcome::Ignored(CeremonyState::Unsupported)
    );

    let doc = browser.ui.document();
    assert_eq!(
        doc.element(BROWSER_SUPPORT_ID).unwrap().display.as_deref(),
        Some("block")
    );
    assert!(doc.element("provision-submit").unwrap().disabled);
    assert!(server.requests().is_empty());
}
