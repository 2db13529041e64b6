//! CAPTCHA challenge and verification endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChallengeRequest {
    /// Action label the challenge is bound to; may be empty
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    /// Self-contained signed token; echo it back at verification
    pub token: String,

    /// `data:image/png;base64` URL of the challenge, when rendering is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Token expiry as unix seconds
    pub expires_at: i64,
}

/// Issue a new CAPTCHA challenge
///
/// The answer never leaves the server; the returned token commits to it
/// through its MAC and is the only thing the client must retain.
pub async fn issue_challenge(
    State(state): State<AppState>,
    Json(payload): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, StatusCode> {
    let issued = state.captcha.issue(&payload.action).map_err(|e| {
        tracing::error!(error = %e, "CAPTCHA issuance failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::debug!(
        action = %payload.action,
        expires_at = issued.expires_at,
        image = issued.image.is_some(),
        "Issued CAPTCHA challenge"
    );

    Ok(Json(ChallengeResponse {
        token: issued.token,
        image: issued
            .image
            .map(|b64| format!("data:image/png;base64,{b64}")),
        expires_at: issued.expires_at,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Token returned by the challenge endpoint
    pub token: String,

    /// User-supplied answer
    pub answer: String,

    /// Expected action; empty skips the action check
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Whether the answer matches; no failure cause is exposed
    pub valid: bool,
}

/// Verify a CAPTCHA answer against its token
pub async fn verify_challenge(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let valid = state
        .captcha
        .verify(&payload.token, &payload.answer, &payload.action);

    tracing::debug!(action = %payload.action, valid, "Verified CAPTCHA answer");

    Json(VerifyResponse { valid })
}
