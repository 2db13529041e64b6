//! # Portcullis
//!
//! Stateless captcha issuance and verification. Every challenge is bound
//! to a signed, self-contained token: an HMAC-SHA-256 tag over the answer,
//! a random nonce, an expiry and an action label. Any instance holding the
//! same secret can verify an answer with no session storage, shared cache
//! or database, which makes horizontal scaling trivial. Challenges can
//! optionally be rendered as noisy PNG images.
//!
//! ```
//! use portcullis::{Captcha, Config};
//!
//! let captcha = Captcha::new(Config {
//!     secret: b"example-secret".to_vec(),
//!     ..Config::default()
//! });
//!
//! let issued = captcha.issue("signup").unwrap();
//! assert!(captcha.verify(&issued.token, &issued.answer, "signup"));
//! assert!(!captcha.verify(&issued.token, "WRONG", "signup"));
//! ```
//!
//! ## Modules
//!
//! - `config` - engine configuration and documented defaults
//! - `token` - token payload codec and integrity tags
//! - `render` - PNG challenge rendering (fonts, noise, layout)
//! - `error` - error type

pub mod config;
pub mod error;
mod random;
pub mod render;
mod service;
pub mod token;

pub use config::{Color, Config, FontConfig};
pub use error::CaptchaError;
pub use random::ALPHABET;
pub use service::{Captcha, Issuance};
