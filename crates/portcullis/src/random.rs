//! Random answer and nonce generation.
//!
//! Answers and nonces are security material and always come from the
//! operating-system CSPRNG. Cosmetic randomness for image noise lives in
//! the render module and uses the fast thread-local generator instead.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::config::DEFAULT_LENGTH;
use crate::error::CaptchaError;

/// Characters allowed in captcha answers.
///
/// Uppercase letters and digits with `I`, `O`, `0` and `1` removed as
/// visually ambiguous. The alphabet has 32 entries, so reducing a random
/// byte modulo its length is bias-free.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Nonce length in raw bytes, before base64url encoding.
pub(crate) const NONCE_BYTES: usize = 16;

/// Generate a random answer of `length` characters from [`ALPHABET`].
///
/// A zero `length` falls back to the default of six characters.
pub(crate) fn answer(length: usize) -> Result<String, CaptchaError> {
    let length = if length == 0 { DEFAULT_LENGTH } else { length };
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CaptchaError::Rng(e.to_string()))?;
    Ok(bytes
        .iter()
        .map(|&b| ALPHABET[b as usize % ALPHABET.len()] as char)
        .collect())
}

/// Generate a 16-byte random nonce, base64url-encoded without padding.
pub(crate) fn nonce() -> Result<String, CaptchaError> {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CaptchaError::Rng(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_has_requested_length() {
        let a = answer(12).unwrap();
        assert_eq!(a.chars().count(), 12);
    }

    #[test]
    fn answer_zero_length_uses_default() {
        let a = answer(0).unwrap();
        assert_eq!(a.chars().count(), DEFAULT_LENGTH);
    }

    #[test]
    fn answer_avoids_ambiguous_characters() {
        for _ in 0..200 {
            let a = answer(8).unwrap();
            for c in a.chars() {
                assert!(
                    ALPHABET.contains(&(c as u8)),
                    "unexpected answer character {c:?}"
                );
            }
            assert!(!a.contains(['I', 'O', '0', '1']));
        }
    }

    #[test]
    fn nonce_is_sixteen_bytes_and_unique() {
        let n1 = nonce().unwrap();
        let n2 = nonce().unwrap();
        assert_ne!(n1, n2);

        let raw = URL_SAFE_NO_PAD.decode(&n1).unwrap();
        assert_eq!(raw.len(), NONCE_BYTES);
    }
}
