//! Fixed-grid bitmap charset rendering.
//!
//! The charset texture is a 16x16 grid of glyph cells indexed directly by
//! byte value: row is the high nibble, column the low nibble, each cell
//! spanning 1/16 of the texture. Strings are drawn in two passes, a black
//! drop shadow offset one virtual unit down-right and then the face pass,
//! so colored text stays legible over arbitrary scene content.
//!
//! Inline `^digit` escapes recolor the face pass mid-string; see
//! [`crate::colors`] for the escape grammar.

use crate::backend::{DrawRect, RenderBackend, ShaderHandle, UvRect};
use crate::canvas::Canvas;
use crate::colors::{self, Rgba};

/// Small (console) char cell width, in device pixels.
pub const SMALLCHAR_WIDTH: f32 = 8.0;
/// Small (console) char cell height, in device pixels.
pub const SMALLCHAR_HEIGHT: f32 = 16.0;
/// Big char cell width, in virtual units.
pub const BIGCHAR_WIDTH: f32 = 16.0;
/// Big char cell height, in virtual units.
pub const BIGCHAR_HEIGHT: f32 = 16.0;

/// One glyph cell as a fraction of the charset texture.
const CELL: f32 = 0.0625;

// =============================================================================
// Charset Renderer
// =============================================================================

/// Draws square bitmap glyphs out of the 16x16 charset texture.
pub struct CharsetRenderer {
    shader: ShaderHandle,
}

impl CharsetRenderer {
    pub const fn new(shader: ShaderHandle) -> Self {
        Self { shader }
    }

    // -------------------------------------------------------------------------
    // Single Characters
    // -------------------------------------------------------------------------

    /// Draw one glyph at virtual coordinates, `size` units square.
    ///
    /// Spaces are skipped, as are glyphs entirely above the top edge.
    pub fn draw_char<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        size: f32,
        ch: u8,
    ) {
        if ch == b' ' {
            return;
        }
        if y < -size {
            return;
        }

        let row = (ch >> 4) as f32;
        let col = (ch & 15) as f32;
        let s1 = col * CELL;
        let t1 = row * CELL;
        let uv = UvRect::new(s1, t1, s1 + CELL, t1 + CELL);
        canvas.draw_pic_uv(x, y, size, size, uv, self.shader);
    }

    /// Draw one glyph at native device pixels, 8x16, skipping the
    /// virtual transform. Used for console-density text.
    pub fn draw_small_char<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        ch: u8,
    ) {
        if ch == b' ' {
            return;
        }
        if y < -SMALLCHAR_HEIGHT {
            return;
        }

        let row = (ch >> 4) as f32;
        let col = (ch & 15) as f32;
        let s1 = col * CELL;
        let t1 = row * CELL;
        let uv = UvRect::new(s1, t1, s1 + CELL, t1 + CELL);
        canvas.draw_device_pic(
            DrawRect::new(x, y, SMALLCHAR_WIDTH, SMALLCHAR_HEIGHT),
            uv,
            self.shader,
        );
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    /// Two-pass string draw with a caller-supplied horizontal advance.
    ///
    /// Pass one draws every visible glyph in black at (+1, +1) for the drop
    /// shadow; escapes are consumed without advancing. Pass two draws the
    /// face, switching to the palette color at each escape unless
    /// `force_color` pins the caller's color. Alpha always stays the
    /// caller's. Color state is reset before returning.
    fn draw_string_ext<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        size: f32,
        advance: f32,
        text: &str,
        color: Rgba,
        force_color: bool,
    ) {
        let bytes = text.as_bytes();

        // Shadow pass.
        canvas.backend().set_color(Some(colors::BLACK.with_alpha(color.a)));
        let mut xx = x;
        let mut i = 0;
        while i < bytes.len() {
            if colors::is_color_escape(bytes, i) {
                i += 2;
                continue;
            }
            self.draw_char(canvas, xx + 1.0, y + 1.0, size, bytes[i]);
            xx += advance;
            i += 1;
        }

        // Face pass.
        canvas.backend().set_color(Some(color));
        let mut xx = x;
        let mut i = 0;
        while i < bytes.len() {
            if colors::is_color_escape(bytes, i) {
                if !force_color {
                    let mut c = colors::color_from_escape(bytes[i + 1]);
                    c.a = color.a;
                    canvas.backend().set_color(Some(c));
                }
                i += 2;
                continue;
            }
            self.draw_char(canvas, xx, y, size, bytes[i]);
            xx += advance;
            i += 1;
        }

        canvas.backend().set_color(None);
    }

    /// Shadowed string with advance equal to the glyph size.
    pub fn draw_string<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        size: f32,
        text: &str,
        color: Rgba,
        force_color: bool,
    ) {
        self.draw_string_ext(canvas, x, y, size, size, text, color, force_color);
    }

    /// Shadowed string with glyphs tightened by one eighth of the size.
    pub fn draw_condensed_string<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        size: f32,
        text: &str,
        color: Rgba,
        force_color: bool,
    ) {
        self.draw_string_ext(canvas, x, y, size, size - size / 8.0, text, color, force_color);
    }

    /// Big (16-unit) white string at the given opacity, escapes honored.
    pub fn draw_big_string<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        text: &str,
        alpha: f32,
    ) {
        self.draw_string(canvas, x, y, BIGCHAR_WIDTH, text, colors::WHITE.with_alpha(alpha), false);
    }

    /// Big string pinned to one color, escapes drawn over but ignored.
    pub fn draw_big_string_color<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        text: &str,
        color: Rgba,
    ) {
        self.draw_string(canvas, x, y, BIGCHAR_WIDTH, text, color, true);
    }

    /// Single-pass console-density string at native device pixels. No
    /// shadow; escapes recolor unless `force_color`.
    pub fn draw_small_string<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        text: &str,
        color: Rgba,
        force_color: bool,
    ) {
        let bytes = text.as_bytes();
        canvas.backend().set_color(Some(color));
        let mut xx = x;
        let mut i = 0;
        while i < bytes.len() {
            if colors::is_color_escape(bytes, i) {
                if !force_color {
                    let mut c = colors::color_from_escape(bytes[i + 1]);
                    c.a = color.a;
                    canvas.backend().set_color(Some(c));
                }
                i += 2;
                continue;
            }
            self.draw_small_char(canvas, xx, y, bytes[i]);
            xx += SMALLCHAR_WIDTH;
            i += 1;
        }
        canvas.backend().set_color(None);
    }
}

// =============================================================================
// Measurement
// =============================================================================

/// Count of visible glyphs, with `^digit` escape pairs excluded.
pub fn display_length(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if colors::is_color_escape(bytes, i) {
            i += 2;
            continue;
        }
        count += 1;
        i += 1;
    }
    count
}

/// Width of a condensed string at the given glyph size.
///
/// Counts raw bytes rather than visible glyphs, so strings containing
/// color escapes measure wider than they draw. Kept that way because
/// existing layouts were tuned against it.
pub fn condensed_string_width(size: f32, text: &str) -> f32 {
    let len = text.len() as f32;
    size * len - (size / 8.0) * len
}

/// Width of a small (console-density) string, in device pixels.
pub fn small_string_width(text: &str) -> f32 {
    display_length(text) as f32 * SMALLCHAR_WIDTH
}

/// Width of a big string, in virtual units.
pub fn big_string_width(text: &str) -> f32 {
    display_length(text) as f32 * BIGCHAR_WIDTH
}

// =============================================================================
// Unit Tests
// =============================================================================
