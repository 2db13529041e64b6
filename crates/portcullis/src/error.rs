//! Error types for the Portcullis captcha engine.

use thiserror::Error;

/// Errors surfaced by captcha issuance and rendering.
///
/// Verification never produces an error: every failure mode of
/// [`Captcha::verify`](crate::Captcha::verify) folds into a plain `false`
/// so callers cannot tell which check rejected a token.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Operating-system random source failure
    #[error("Random source error: {0}")]
    Rng(String),

    /// Token could not be encoded or decoded
    #[error("Token codec error: {0}")]
    Token(String),

    /// Font data could not be parsed as a TrueType/OpenType face
    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    /// Canvas could not be encoded as PNG
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Rendering configuration is unusable
    #[error("Render error: {0}")]
    Render(String),
}
