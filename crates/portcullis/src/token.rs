//! Token payload codec and keyed integrity tags.
//!
//! A token is the only artifact a client holds between issuance and
//! verification: the JSON form of [`TokenPayload`], base64url-encoded
//! without padding. Its `m` field is an HMAC-SHA-256 tag over the
//! pipe-delimited canonical string `answer|nonce|expiry|action`, which is
//! what lets any instance sharing the secret re-check an answer without
//! storing anything.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::CaptchaError;

type HmacSha256 = Hmac<Sha256>;

/// Wire payload of a captcha token.
///
/// Field names are single letters to keep the encoded token short. The
/// answer itself never appears here; only the tag commits to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Random per-issuance nonce (base64url, no padding)
    pub c: String,
    /// Expiry as unix seconds
    pub e: i64,
    /// Action label this challenge is bound to; may be empty
    pub a: String,
    /// Integrity tag: lowercase hex HMAC-SHA-256
    pub m: String,
}

/// Serialize a payload into its URL-safe transport form.
pub fn encode(payload: &TokenPayload) -> Result<String, CaptchaError> {
    let json = serde_json::to_vec(payload).map_err(|e| CaptchaError::Token(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a transport-form token back into its payload.
pub fn decode(token: &str) -> Result<TokenPayload, CaptchaError> {
    let json = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CaptchaError::Token(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| CaptchaError::Token(e.to_string()))
}

/// Compute the hex integrity tag over the canonical pipe-delimited form.
///
/// The delimiter cannot collide: answers use a fixed alphanumeric
/// alphabet, nonces are base64url, expiries are decimal, and the action
/// is the final field.
pub(crate) fn tag(secret: &[u8], answer: &str, nonce: &str, expiry: i64, action: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(format!("{answer}|{nonce}|{expiry}|{action}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compare a token's tag against the tag recomputed from `answer`.
///
/// The hex strings are compared byte for byte in constant time, so a
/// mismatch costs the same regardless of how many leading characters
/// agree, and a case-folded copy of a valid tag does not pass.
pub(crate) fn tag_matches(
    secret: &[u8],
    answer: &str,
    nonce: &str,
    expiry: i64,
    action: &str,
    token_tag: &str,
) -> bool {
    let expected = tag(secret, answer, nonce, expiry, action);
    expected.as_bytes().ct_eq(token_tag.as_bytes()).into()
}
