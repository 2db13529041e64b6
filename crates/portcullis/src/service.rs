//! Stateless captcha issuance and verification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::Config;
use crate::error::CaptchaError;
use crate::random;
use crate::render;
use crate::token::{self, TokenPayload};

/// Result of a successful issuance.
///
/// `answer` is the transient plaintext the user must echo back. It exists
/// only in this value; the token commits to it through the MAC without
/// containing it, and nothing is stored server-side.
#[derive(Debug, Clone)]
pub struct Issuance {
    /// Self-contained signed token, URL-safe
    pub token: String,
    /// Plaintext answer; show it to the user, then drop it
    pub answer: String,
    /// Base64 (standard alphabet) PNG challenge, when image output is on
    pub image: Option<String>,
    /// Expiry embedded in the token, unix seconds
    pub expires_at: i64,
}

/// Stateless captcha issuer and verifier.
///
/// Construction normalizes the configuration; afterwards the instance is
/// immutable and freely shareable across threads. Verification needs no
/// state beyond the signing secret, so any instance configured with the
/// same secret can verify tokens issued by another.
#[derive(Debug, Clone)]
pub struct Captcha {
    cfg: Config,
}

impl Captcha {
    /// Create a service from `cfg`, normalizing zero and empty fields to
    /// the documented defaults.
    pub fn new(mut cfg: Config) -> Self {
        cfg.normalize();
        Self { cfg }
    }

    /// The normalized configuration in effect.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Issue a new challenge bound to `action`.
    ///
    /// Generates a random answer and nonce, signs them together with the
    /// expiry and action into a token, and optionally renders the answer
    /// as a PNG. The answer is committed to in its normalized form, so
    /// case-insensitive services accept any casing at verification.
    pub fn issue(&self, action: &str) -> Result<Issuance, CaptchaError> {
        let answer = random::answer(self.cfg.length)?;
        let nonce = random::nonce()?;
        let expires_at = chrono::Utc::now().timestamp() + self.cfg.expiry_secs as i64;

        let normalized = normalize_answer(&answer, self.cfg.case_sensitive);
        let tag = token::tag(&self.cfg.secret, &normalized, &nonce, expires_at, action);
        let token = token::encode(&TokenPayload {
            c: nonce,
            e: expires_at,
            a: action.to_string(),
            m: tag,
        })?;

        let image = if self.cfg.image {
            Some(STANDARD.encode(render::render_png(&answer, &self.cfg)?))
        } else {
            None
        };

        tracing::debug!(
            action = %action,
            expires_at,
            image = image.is_some(),
            "issued captcha challenge"
        );

        Ok(Issuance {
            token,
            answer,
            image,
            expires_at,
        })
    }

    /// Check `user_answer` against a previously issued `token`.
    ///
    /// Returns `false` for every failure, whether the token is malformed,
    /// expired, bound to another action, or the answer is wrong; the
    /// caller cannot tell which check rejected it. The check is pure: the
    /// token is not consumed, and replay prevention is left to the layer
    /// that owns request state.
    ///
    /// An empty `expected_action` skips the action comparison. When the
    /// configuration carries an action allow-list, tokens bound to actions
    /// outside it are rejected regardless.
    pub fn verify(&self, token: &str, user_answer: &str, expected_action: &str) -> bool {
        let Ok(payload) = token::decode(token) else {
            return false;
        };
        if chrono::Utc::now().timestamp() > payload.e {
            return false;
        }
        if !expected_action.is_empty() && payload.a != expected_action {
            return false;
        }
        if !self.cfg.allow_actions.is_empty()
            && !self.cfg.allow_actions.iter().any(|a| *a == payload.a)
        {
            return false;
        }

        let normalized = normalize_answer(user_answer, self.cfg.case_sensitive);
        let valid = token::tag_matches(
            &self.cfg.secret,
            &normalized,
            &payload.c,
            payload.e,
            &payload.a,
            &payload.m,
        );
        tracing::debug!(action = %payload.a, valid, "verified captcha answer");
        valid
    }
}

/// Trim surrounding whitespace and fold case unless matching is
/// case-sensitive.
fn normalize_answer(answer: &str, case_sensitive: bool) -> String {
    let trimmed = answer.trim();
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_lowercase()
    }
}
