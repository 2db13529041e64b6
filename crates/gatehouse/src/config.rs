//! Configuration management for Gatehouse.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use portcullis::{Color, Config as EngineConfig, FontConfig};

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8088";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Captcha engine configuration
    #[serde(default)]
    pub captcha: CaptchaSettings,
}

/// Captcha-specific configuration, mapped onto the engine's `Config`
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaSettings {
    /// HMAC signing secret; empty falls back to the engine placeholder
    /// (development only)
    #[serde(default)]
    pub secret: String,

    /// Answer length in characters
    #[serde(default = "default_length")]
    pub length: usize,

    /// Token lifetime in seconds
    #[serde(default = "default_expiry")]
    pub expiry_secs: u64,

    /// Attach a rendered PNG challenge to each token
    #[serde(default = "default_image")]
    pub image: bool,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Number of noise strokes per image
    #[serde(default = "default_noise")]
    pub noise: u32,

    /// Match answers case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,

    /// Allow-list of action labels; empty allows all
    #[serde(default)]
    pub allow_actions: Vec<String>,

    /// Text color; engine default when omitted
    #[serde(default)]
    pub fg: Option<Color>,

    /// Background color; engine default when omitted
    #[serde(default)]
    pub bg: Option<Color>,

    /// Built-in font face name
    #[serde(default)]
    pub font_name: String,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Rendering resolution in dots per inch
    #[serde(default = "default_font_dpi")]
    pub font_dpi: f32,
}

impl Default for CaptchaSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            length: default_length(),
            expiry_secs: default_expiry(),
            image: default_image(),
            width: default_width(),
            height: default_height(),
            noise: default_noise(),
            case_sensitive: false,
            allow_actions: Vec::new(),
            fg: None,
            bg: None,
            font_name: String::new(),
            font_size: default_font_size(),
            font_dpi: default_font_dpi(),
        }
    }
}

impl CaptchaSettings {
    /// Map the facade settings onto an engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            secret: self.secret.clone().into_bytes(),
            length: self.length,
            expiry_secs: self.expiry_secs,
            image: self.image,
            width: self.width,
            height: self.height,
            noise: self.noise,
            case_sensitive: self.case_sensitive,
            allow_actions: self.allow_actions.clone(),
            fg: self.fg.unwrap_or(portcullis::config::DEFAULT_FG),
            bg: self.bg.unwrap_or(portcullis::config::DEFAULT_BG),
            font: FontConfig {
                name: self.font_name.clone(),
                ttf: None,
                size: self.font_size,
                dpi: self.font_dpi,
            },
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_request_timeout() -> u64 { 10 }
fn default_length() -> usize { portcullis::config::DEFAULT_LENGTH }
fn default_expiry() -> u64 { portcullis::config::DEFAULT_EXPIRY_SECS }
fn default_image() -> bool { true } // an HTTP challenge without an image is useless to humans
fn default_width() -> u32 { portcullis::config::DEFAULT_WIDTH }
fn default_height() -> u32 { portcullis::config::DEFAULT_HEIGHT }
fn default_noise() -> u32 { portcullis::config::DEFAULT_NOISE }
fn default_font_size() -> f32 { portcullis::config::DEFAULT_FONT_SIZE }
fn default_font_dpi() -> f32 { portcullis::config::DEFAULT_FONT_DPI }

impl AppConfig {
    /// Load configuration from file, falling back to defaults when the
    /// file does not exist. CLI overrides are applied by the caller.
    pub fn load(config_path: &str) -> Result<Self> {
        if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings.try_deserialize().context("Failed to parse config")
        } else {
            tracing::warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout(),
            captcha: CaptchaSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_map_onto_engine_defaults() {
        let settings = CaptchaSettings::default();
        let engine = settings.engine_config();
        assert!(engine.secret.is_empty());
        assert_eq!(engine.length, portcullis::config::DEFAULT_LENGTH);
        assert_eq!(engine.expiry_secs, portcullis::config::DEFAULT_EXPIRY_SECS);
        assert!(engine.image);
        assert_eq!(engine.fg, portcullis::config::DEFAULT_FG);
        assert_eq!(engine.bg, portcullis::config::DEFAULT_BG);
    }

    #[test]
    fn loads_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
listen_addr = "127.0.0.1:9099"

[captcha]
secret = "file-secret"
length = 8
expiry_secs = 60
image = false
case_sensitive = true
allow_actions = ["signup", "login"]
font_name = "dejavu-sans-mono"
fg = {{ r = 10, g = 20, b = 30, a = 255 }}
"#
        )
        .unwrap();

        let cfg = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:9099");
        assert_eq!(cfg.captcha.secret, "file-secret");
        assert_eq!(cfg.captcha.length, 8);
        assert_eq!(cfg.captcha.expiry_secs, 60);
        assert!(!cfg.captcha.image);
        assert!(cfg.captcha.case_sensitive);
        assert_eq!(cfg.captcha.allow_actions, vec!["signup", "login"]);
        assert_eq!(cfg.captcha.fg, Some(Color::rgb(10, 20, 30)));
        // unset fields keep their defaults
        assert_eq!(cfg.captcha.width, portcullis::config::DEFAULT_WIDTH);
        assert!(cfg.captcha.bg.is_none());

        let engine = cfg.captcha.engine_config();
        assert_eq!(engine.secret, b"file-secret");
        assert_eq!(engine.font.name, "dejavu-sans-mono");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load("/nonexistent/gatehouse.toml").unwrap();
        assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
        assert!(cfg.captcha.secret.is_empty());
    }
}
