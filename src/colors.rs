//! Color palette and inline color-escape parsing.
//!
//! Renderable strings may embed 2-byte color switches: the escape marker
//! `^` followed by a decimal digit selecting an entry of [`COLOR_TABLE`].
//! Every routine that measures or draws text consumes a detected escape as
//! exactly 2 bytes and never rasterizes them as glyphs.
//!
//! # Defensive Parsing
//!
//! A `^` that is the last byte of a string, or a `^` followed by a
//! non-digit, is **not** an escape and is rendered as an ordinary
//! character. [`is_color_escape`] only ever reads `pos` and `pos + 1`
//! after bounds-checking, so malformed input cannot read out of bounds.
//!
//! # Selector Totality
//!
//! [`color_index`] masks the selector into the 8-entry table instead of
//! rejecting it, so `^8`/`^9` wrap around (`^9` selects red). Lookups are
//! total; there is no invalid selector once an escape has been detected.

// =============================================================================
// Tint Color
// =============================================================================

/// RGBA tint pushed into the renderer backend's color state.
///
/// Components are normalized 0.0..=1.0. Alpha rides along for fades and
/// drop-shadow styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Construct a color from all four components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self { Self { r, g, b, a } }

    /// Construct a fully opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self { Self::new(r, g, b, 1.0) }

    /// Copy of this color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self { Self { a, ..self } }

    /// True for pure black (ignores alpha). Used by the glyph renderer to
    /// pick a visible shadow tint under black text.
    pub fn is_black(&self) -> bool { self.r == 0.0 && self.g == 0.0 && self.b == 0.0 }
}

// =============================================================================
// Palette
// =============================================================================

/// Opaque black. Palette entry 0, also the letterbox/graph background fill.
pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

/// Opaque white. Palette entry 7, the default text color.
pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

/// The digit-indexed text color palette (`^0` through `^7`).
pub const COLOR_TABLE: [Rgba; 8] = [
    BLACK,                         // ^0
    Rgba::rgb(1.0, 0.0, 0.0),      // ^1 red
    Rgba::rgb(0.0, 1.0, 0.0),      // ^2 green
    Rgba::rgb(1.0, 1.0, 0.0),      // ^3 yellow
    Rgba::rgb(0.0, 0.0, 1.0),      // ^4 blue
    Rgba::rgb(0.0, 1.0, 1.0),      // ^5 cyan
    Rgba::rgb(1.0, 0.0, 1.0),      // ^6 magenta
    WHITE,                         // ^7
];

// =============================================================================
// Escape Parsing
// =============================================================================

/// The color-escape marker byte.
pub const COLOR_ESCAPE: u8 = b'^';

/// True iff `bytes[pos]` starts a 2-byte color escape (marker + digit).
///
/// Callers that get `true` must advance exactly 2 bytes and must not
/// render either byte.
pub fn is_color_escape(bytes: &[u8], pos: usize) -> bool {
    pos + 1 < bytes.len() && bytes[pos] == COLOR_ESCAPE && bytes[pos + 1].is_ascii_digit()
}

/// Map a selector byte to a palette index, masking into the table.
pub const fn color_index(selector: u8) -> usize {
    (selector.wrapping_sub(b'0') & 7) as usize
}

/// Resolve an escape selector digit to its palette color.
pub fn color_from_escape(selector: u8) -> Rgba {
    COLOR_TABLE[color_index(selector)]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Escape Detection Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_is_color_escape_valid() {
        assert!(is_color_escape(b"^1Hello", 0), "^1 should be an escape");
        assert!(is_color_escape(b"ab^7", 2), "escape mid-string should be detected");
    }

    #[test]
    fn test_is_color_escape_trailing_marker() {
        // A marker as the final byte has no selector; it must be treated
        // as an ordinary character, never read past the end.
        assert!(!is_color_escape(b"^", 0), "trailing marker is not an escape");
        assert!(!is_color_escape(b"abc^", 3), "trailing marker is not an escape");
    }

    #[test]
    fn test_is_color_escape_non_digit_selector() {
        assert!(!is_color_escape(b"^^", 0), "doubled marker is not an escape");
        assert!(!is_color_escape(b"^x", 0), "non-digit selector is not an escape");
        assert!(!is_color_escape(b"x1", 0), "no marker means no escape");
    }

    #[test]
    fn test_is_color_escape_all_digits() {
        for d in b'0'..=b'9' {
            let s = [COLOR_ESCAPE, d];
            assert!(is_color_escape(&s, 0), "^{} should be an escape", d as char);
        }
    }

    // -------------------------------------------------------------------------
    // Selector Resolution Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_color_index_in_range() {
        assert_eq!(color_index(b'0'), 0);
        assert_eq!(color_index(b'7'), 7);
    }

    #[test]
    fn test_color_index_masks_out_of_table() {
        // Selectors past the table wrap instead of clamping: ^8 -> 0, ^9 -> 1
        assert_eq!(color_index(b'8'), 0, "^8 should wrap to palette entry 0");
        assert_eq!(color_index(b'9'), 1, "^9 should wrap to palette entry 1 (red)");
    }

    #[test]
    fn test_color_from_escape() {
        assert_eq!(color_from_escape(b'1'), Rgba::rgb(1.0, 0.0, 0.0), "^1 is red");
        assert_eq!(color_from_escape(b'7'), WHITE, "^7 is white");
        assert_eq!(color_from_escape(b'9'), Rgba::rgb(1.0, 0.0, 0.0), "^9 wraps to red");
    }

    // -------------------------------------------------------------------------
    // Palette Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_palette_endpoints() {
        assert_eq!(COLOR_TABLE[0], BLACK, "palette entry 0 should be black");
        assert_eq!(COLOR_TABLE[7], WHITE, "palette entry 7 should be white");
    }

    #[test]
    fn test_palette_fully_opaque() {
        for (i, c) in COLOR_TABLE.iter().enumerate() {
            assert_eq!(c.a, 1.0, "palette entry {i} should be opaque");
        }
    }

    #[test]
    fn test_is_black() {
        assert!(BLACK.is_black());
        assert!(BLACK.with_alpha(0.5).is_black(), "is_black ignores alpha");
        assert!(!Rgba::rgb(0.2, 0.2, 0.2).is_black());
    }
}
