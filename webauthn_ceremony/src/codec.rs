//! Conversions between base64url wire strings, standard base64 and byte buffers.

use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode,
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
    },
};
use thiserror::Error;

/// Standard alphabet, padding optional, non-canonical trailing bits accepted.
///
/// The wire format never carries padding, and browsers' `atob` does not reject
/// trailing bits, so neither does this engine.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Errors raised while decoding wire strings into byte buffers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// Input is not decodable as base64 after alphabet normalization
    #[error("Invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Encodes raw bytes as unpadded base64url.
///
/// Equivalent to standard base64 followed by `+` → `-`, `/` → `_` and removal of
/// every `=`.
pub fn encode_url_safe_base64(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(raw)
}

/// Maps the url-safe alphabet back to the standard one (`_` → `/`, `-` → `+`).
///
/// Padding is not restored; [`decode_standard_base64`] does not need it.
pub fn normalize_base64(url_safe: &str) -> String {
    url_safe.replace('_', "/").replace('-', "+")
}

/// Decodes standard-alphabet base64, with or without padding.
pub fn decode_standard_base64(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD_LENIENT.decode(encoded)?)
}

/// Normalizes a base64url string and decodes it.
pub fn decode_url_safe_base64(encoded: &str) -> Result<Vec<u8>, CodecError> {
    decode_standard_base64(&normalize_base64(encoded))
}

/// Turns every character of `s` into one byte holding its character code.
///
/// The code is the character's first UTF-16 unit, so a character outside the
/// basic multilingual plane contributes its high surrogate. Codes above 255
/// are truncated to their low 8 bits, which is what writing them into a byte
/// array does on the web platform.
pub fn string_to_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| c.encode_utf16(&mut [0; 2])[0] as u8)
        .collect()
}
