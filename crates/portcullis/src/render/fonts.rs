//! Built-in font registry.
//!
//! Embeds a small fixed set of TrueType faces so rendering needs no
//! filesystem access. The DejaVu family ships under the Bitstream Vera
//! license, see `assets/fonts/LICENSE`.

use crate::config::FontConfig;

/// Registry name of the default face (an alias for DejaVu Sans).
pub const FONT_DEFAULT: &str = "default";

/// DejaVu Sans, the default proportional face.
pub const FONT_DEJAVU_SANS: &str = "dejavu-sans";

/// DejaVu Sans Mono, a fixed-width alternative.
pub const FONT_DEJAVU_SANS_MONO: &str = "dejavu-sans-mono";

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static DEJAVU_SANS_MONO: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Resolve a built-in face name to its embedded TTF bytes.
///
/// Lookup ignores case and surrounding whitespace. Empty and unknown
/// names resolve to the default face, so this function always returns
/// usable font data.
pub fn builtin(name: &str) -> &'static [u8] {
    match name.trim().to_ascii_lowercase().as_str() {
        FONT_DEJAVU_SANS_MONO => DEJAVU_SANS_MONO,
        "" | FONT_DEFAULT | FONT_DEJAVU_SANS => DEJAVU_SANS,
        _ => DEJAVU_SANS,
    }
}

/// Face bytes for a font configuration: raw `ttf` data when supplied,
/// otherwise the named built-in.
pub(crate) fn face_bytes(font: &FontConfig) -> &[u8] {
    match &font.ttf {
        Some(ttf) if !ttf.is_empty() => ttf,
        _ => builtin(&font.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert!(std::ptr::eq(builtin(" DejaVu-Sans-Mono  "), DEJAVU_SANS_MONO));
        assert!(std::ptr::eq(builtin("DEJAVU-SANS"), DEJAVU_SANS));
    }

    #[test]
    fn empty_and_unknown_names_fall_back_to_default() {
        assert!(std::ptr::eq(builtin(""), DEJAVU_SANS));
        assert!(std::ptr::eq(builtin(FONT_DEFAULT), DEJAVU_SANS));
        assert!(std::ptr::eq(builtin("no-such-face"), DEJAVU_SANS));
    }

    #[test]
    fn builtin_faces_parse() {
        assert!(ab_glyph::FontRef::try_from_slice(builtin(FONT_DEJAVU_SANS)).is_ok());
        assert!(ab_glyph::FontRef::try_from_slice(builtin(FONT_DEJAVU_SANS_MONO)).is_ok());
    }

    #[test]
    fn raw_ttf_bytes_win_over_name() {
        let font = FontConfig {
            name: FONT_DEJAVU_SANS_MONO.into(),
            ttf: Some(vec![1, 2, 3]),
            ..FontConfig::default()
        };
        assert_eq!(face_bytes(&font), &[1, 2, 3]);

        // an empty override is ignored in favor of the named face
        let empty_override = FontConfig {
            name: FONT_DEJAVU_SANS_MONO.into(),
            ttf: Some(Vec::new()),
            ..FontConfig::default()
        };
        assert!(std::ptr::eq(face_bytes(&empty_override), DEJAVU_SANS_MONO));
    }
}
