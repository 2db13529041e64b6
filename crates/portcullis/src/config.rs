//! Captcha engine configuration and its documented defaults.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret used when none is configured.
///
/// Well-known by definition. Deployments must supply their own secret;
/// anyone holding this value can forge tokens.
pub const DEFAULT_SECRET: &[u8] = b"CHANGE-ME-TOKEN-SECRET";

/// Default answer length in characters.
pub const DEFAULT_LENGTH: usize = 6;

/// Default token lifetime in seconds.
pub const DEFAULT_EXPIRY_SECS: u64 = 120;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 220;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 70;

/// Default number of noise strokes per image.
pub const DEFAULT_NOISE: u32 = 10;

/// Default text color.
pub const DEFAULT_FG: Color = Color::BLACK;

/// Default canvas background (light gray).
pub const DEFAULT_BG: Color = Color::rgb(245, 245, 245);

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 28.0;

/// Default rendering resolution in dots per inch.
pub const DEFAULT_FONT_DPI: f32 = 72.0;

/// Plain RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub(crate) fn pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Font selection and scaling for rendered challenges.
///
/// Raw `ttf` bytes take precedence over `name`; an empty or unknown name
/// resolves to the built-in default face.
#[derive(Debug, Clone)]
pub struct FontConfig {
    /// Built-in face name, see [`render::builtin`](crate::render::builtin)
    pub name: String,
    /// Raw TrueType/OpenType data overriding the named face
    pub ttf: Option<Vec<u8>>,
    /// Size in points
    pub size: f32,
    /// Resolution in dots per inch
    pub dpi: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            ttf: None,
            size: DEFAULT_FONT_SIZE,
            dpi: DEFAULT_FONT_DPI,
        }
    }
}

/// Complete configuration for a [`Captcha`](crate::Captcha) instance.
///
/// [`Captcha::new`](crate::Captcha::new) normalizes zero and empty fields
/// to the documented defaults, so partially filled values built with
/// `..Config::default()` are always usable. Boolean fields are taken
/// as-is.
#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC signing secret. The default is a well-known placeholder.
    pub secret: Vec<u8>,
    /// Answer length in characters
    pub length: usize,
    /// Token lifetime in seconds
    pub expiry_secs: u64,
    /// Render a PNG challenge image with each issuance
    pub image: bool,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Number of random noise strokes drawn over the canvas
    pub noise: u32,
    /// Match answers case-sensitively
    pub case_sensitive: bool,
    /// Allow-list of action labels accepted at verification; empty allows all
    pub allow_actions: Vec<String>,
    /// Text color
    pub fg: Color,
    /// Canvas background color
    pub bg: Color,
    /// Font selection and scaling
    pub font: FontConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_vec(),
            length: DEFAULT_LENGTH,
            expiry_secs: DEFAULT_EXPIRY_SECS,
            image: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            noise: DEFAULT_NOISE,
            case_sensitive: false,
            allow_actions: Vec::new(),
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            font: FontConfig::default(),
        }
    }
}

impl Config {
    /// Replace zero and empty fields with the documented defaults.
    ///
    /// Idempotent. Booleans and colors are never touched since `false`
    /// and transparent black are legitimate values.
    pub fn normalize(&mut self) {
        if self.secret.is_empty() {
            self.secret = DEFAULT_SECRET.to_vec();
        }
        if self.length == 0 {
            self.length = DEFAULT_LENGTH;
        }
        if self.expiry_secs == 0 {
            self.expiry_secs = DEFAULT_EXPIRY_SECS;
        }
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        if self.noise == 0 {
            self.noise = DEFAULT_NOISE;
        }
        if self.font.size <= 0.0 {
            self.font.size = DEFAULT_FONT_SIZE;
        }
        if self.font.dpi <= 0.0 {
            self.font.dpi = DEFAULT_FONT_DPI;
        }
    }
}
