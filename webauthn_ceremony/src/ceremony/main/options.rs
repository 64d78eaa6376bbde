use crate::ceremony::errors::CeremonyError;
use crate::ceremony::types::{AuthenticationOptions, RegistrationOptions};
use crate::codec::{decode_url_safe_base64, string_to_bytes};
use crate::platform::{
    PublicKeyCredentialCreationOptions, PublicKeyCredentialDescriptor,
    PublicKeyCredentialRequestOptions, PublicKeyCredentialUserEntity,
};

/// Decodes the binary members of server authentication options.
///
/// `challenge` and every `allowCredentials[].id` go through the url-safe
/// decoder; everything else is carried over as received.
pub fn transform_assertion_options(
    options: AuthenticationOptions,
) -> Result<PublicKeyCredentialRequestOptions, CeremonyError> {
    let challenge = decode_url_safe_base64(&options.challenge)?;

    let allow_credentials = options
        .allow_credentials
        .into_iter()
        .map(|descriptor| -> Result<_, CeremonyError> {
            Ok(PublicKeyCredentialDescriptor {
                id: decode_url_safe_base64(&descriptor.id)?,
                type_: descriptor.type_,
                extra: descriptor.extra,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Transformed assertion options: {} byte challenge, {} allowed credential(s)",
        challenge.len(),
        allow_credentials.len()
    );

    Ok(PublicKeyCredentialRequestOptions {
        challenge,
        allow_credentials,
        extra: options.extra,
    })
}

/// Converts server registration options for the platform.
///
/// `challenge` and `user.id` are taken character by character, without any
/// base64 decoding: the registration endpoint's values are used as the raw
/// challenge and handle.
pub fn transform_credential_options(
    options: RegistrationOptions,
) -> PublicKeyCredentialCreationOptions {
    PublicKeyCredentialCreationOptions {
        challenge: string_to_bytes(&options.challenge),
        user: PublicKeyCredentialUserEntity {
            id: string_to_bytes(&options.user.id),
            name: options.user.name,
            display_name: options.user.display_name,
            extra: options.user.extra,
        },
        extra: options.extra,
    }
}
