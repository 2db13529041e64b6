//! Captcha image rendering.
//!
//! Rasterizes an answer onto a fixed-size canvas: background fill, random
//! noise strokes, then the text centered using real font metrics. The
//! result is encoded as PNG.

mod fonts;
mod noise;

pub use fonts::{FONT_DEFAULT, FONT_DEJAVU_SANS, FONT_DEJAVU_SANS_MONO, builtin};

use std::io::Cursor;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{ImageFormat, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::config::{Config, FontConfig};
use crate::error::CaptchaError;

/// Render `text` as a PNG according to the rendering fields of `cfg`.
///
/// Noise strokes land under the text, so the answer always stays on top.
/// Text that overflows the canvas is clipped, never an error.
pub fn render_png(text: &str, cfg: &Config) -> Result<Vec<u8>, CaptchaError> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(CaptchaError::Render(format!(
            "canvas must be non-empty, got {}x{}",
            cfg.width, cfg.height
        )));
    }

    let mut img = RgbaImage::from_pixel(cfg.width, cfg.height, cfg.bg.pixel());
    noise::draw(&mut img, cfg.noise);

    let font = FontRef::try_from_slice(fonts::face_bytes(&cfg.font))?;
    let scale = px_scale(&cfg.font);
    let (x, y) = text_origin(&font, scale, text, cfg.width, cfg.height);
    draw_text_mut(&mut img, cfg.fg.pixel(), x, y, scale, &font, text);

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// Pixel scale for a point size at the configured resolution.
fn px_scale(font: &FontConfig) -> PxScale {
    PxScale::from(font.size * font.dpi / 72.0)
}

/// Top-left drawing origin that centers the text block on the canvas.
///
/// Horizontally the text starts at `(width - textWidth) / 2`. Vertically
/// the baseline sits at `(height + textHeight) / 2 - descent` where
/// `textHeight = ceil(ascent) + ceil(descent)`; the returned y is the top
/// of the glyph box, i.e. the baseline minus the ascent.
fn text_origin(
    font: &FontRef<'_>,
    scale: PxScale,
    text: &str,
    width: u32,
    height: u32,
) -> (i32, i32) {
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent().ceil() as i32;
    let descent = (-scaled.descent()).ceil() as i32;
    let text_w = text_width(font, scale, text).round() as i32;
    let text_h = ascent + descent;

    let x = (width as i32 - text_w) / 2;
    let baseline = (height as i32 + text_h) / 2 - descent;
    (x, baseline - ascent)
}

/// Advance width of `text` at `scale`, kerning included.
fn text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}
