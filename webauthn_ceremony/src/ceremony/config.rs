use std::{env, sync::LazyLock};

pub(super) static PROVISION_OPTIONS_PATH: LazyLock<String> = LazyLock::new(|| {
    path_from_env(
        "WEBAUTHN_PROVISION_OPTIONS_PATH",
        "/manage/account/webauthn-provision/options",
    )
});

pub(super) static PROVISION_VALIDATE_PATH: LazyLock<String> = LazyLock::new(|| {
    path_from_env(
        "WEBAUTHN_PROVISION_VALIDATE_PATH",
        "/manage/account/webauthn-provision/validate",
    )
});

pub(super) static AUTHENTICATE_OPTIONS_PATH: LazyLock<String> = LazyLock::new(|| {
    path_from_env(
        "WEBAUTHN_AUTHENTICATE_OPTIONS_PATH",
        "/account/webauthn-authenticate/options",
    )
});

pub(super) static AUTHENTICATE_VALIDATE_PATH: LazyLock<String> = LazyLock::new(|| {
    path_from_env(
        "WEBAUTHN_AUTHENTICATE_VALIDATE_PATH",
        "/account/webauthn-authenticate/validate",
    )
});

/// Where a successful provisioning lands.
pub(super) static ACCOUNT_PAGE_PATH: LazyLock<String> =
    LazyLock::new(|| path_from_env("WEBAUTHN_ACCOUNT_PAGE_PATH", "/manage/account"));

/// Where an authentication with an expired session is sent.
pub(super) static LOGIN_PAGE_PATH: LazyLock<String> =
    LazyLock::new(|| path_from_env("WEBAUTHN_LOGIN_PAGE_PATH", "/account/login"));

/// Reads an origin-relative path, falling back to `default` when unset or not absolute.
fn path_from_env(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(v) if v.starts_with('/') && !v.starts_with("//") => v,
        Ok(v) => {
            tracing::warn!("Invalid {}: {}. Using default '{}'", var, v, default);
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}
