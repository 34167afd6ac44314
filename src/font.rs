//! Proportional font rendering.
//!
//! Unlike the fixed-grid charset, proportional glyphs carry per-glyph
//! metrics: image size, top bearing, horizontal advance, and their own
//! texture window and shader. A font also carries a global `glyph_scale`
//! that folds the authored point size into the caller's scale factor.
//!
//! The renderer holds an optional [`FontInfo`]; until one is installed
//! every draw and measure is a quiet no-op, so callers never branch on
//! asset availability.

use crate::backend::{RenderBackend, ShaderHandle, UvRect};
use crate::canvas::Canvas;
use crate::colors::{self, Rgba};

/// Shadow color substituted when the text itself is black.
const BLACK_TEXT_SHADOW: Rgba = Rgba::rgb(0.2, 0.2, 0.2);
/// Alpha multiplier for the lighter shadow style.
const LIGHT_SHADOW_ALPHA: f32 = 0.7;

// =============================================================================
// Font Data
// =============================================================================

/// Metrics and texture location for one glyph.
#[derive(Clone, Copy, Debug, Default)]
pub struct Glyph {
    /// Rendered quad width, in unscaled font units.
    pub image_width: f32,
    /// Rendered quad height, in unscaled font units.
    pub image_height: f32,
    /// Distance from pen baseline up to the top of the quad.
    pub top: f32,
    /// Horizontal pen advance after this glyph.
    pub x_skip: f32,
    /// Texture window within the glyph sheet.
    pub uv: UvRect,
    /// Sheet holding this glyph.
    pub shader: ShaderHandle,
}

/// A complete loaded font: one glyph per byte value plus the global scale.
#[derive(Clone, Copy)]
pub struct FontInfo {
    pub glyphs: [Glyph; 256],
    pub glyph_scale: f32,
}

impl FontInfo {
    pub const fn glyph(&self, byte: u8) -> &Glyph {
        &self.glyphs[byte as usize]
    }
}

/// Shadow treatment for proportional text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Face only.
    Normal,
    /// Full-opacity drop shadow.
    Shadowed,
    /// Drop shadow at 70% of the text's opacity.
    ShadowedLight,
}

// =============================================================================
// Font Renderer
// =============================================================================

/// Draws and measures proportional text with the currently installed font.
pub struct FontRenderer {
    font: Option<FontInfo>,
}

impl FontRenderer {
    pub const fn new() -> Self {
        Self { font: None }
    }

    pub fn set_font(&mut self, font: FontInfo) {
        self.font = Some(font);
    }

    /// Advance-sum width of `text` at `scale`, in virtual units.
    ///
    /// Escape pairs measure as zero. Returns 0.0 when no font is installed.
    pub fn text_width(&self, text: &str, scale: f32) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };
        let use_scale = scale * font.glyph_scale;
        let bytes = text.as_bytes();
        let mut width = 0.0;
        let mut i = 0;
        while i < bytes.len() {
            if colors::is_color_escape(bytes, i) {
                i += 2;
                continue;
            }
            width += font.glyph(bytes[i]).x_skip;
            i += 1;
        }
        width * use_scale
    }

    /// Draw `text` with `(x, y)` as the pen baseline origin.
    ///
    /// Glyphs are raised above the baseline by their scaled top bearing.
    /// Escapes switch the active color, keeping the caller's alpha. A
    /// no-op when no font is installed.
    pub fn draw_text<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        scale: f32,
        color: Rgba,
        text: &str,
        style: TextStyle,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        let use_scale = scale * font.glyph_scale;
        let bytes = text.as_bytes();

        canvas.backend().set_color(Some(color));
        let mut active = color;
        let mut xx = x;
        let mut i = 0;
        while i < bytes.len() {
            if colors::is_color_escape(bytes, i) {
                let mut c = colors::color_from_escape(bytes[i + 1]);
                c.a = color.a;
                canvas.backend().set_color(Some(c));
                active = c;
                i += 2;
                continue;
            }

            let glyph = *font.glyph(bytes[i]);
            let yadj = use_scale * glyph.top;

            if style != TextStyle::Normal {
                let shadow_alpha = if style == TextStyle::ShadowedLight {
                    active.a * LIGHT_SHADOW_ALPHA
                } else {
                    active.a
                };
                // Black text would lose its shadow entirely; grey it.
                let shadow = if active.is_black() {
                    BLACK_TEXT_SHADOW.with_alpha(shadow_alpha)
                } else {
                    colors::BLACK.with_alpha(shadow_alpha)
                };
                canvas.backend().set_color(Some(shadow));
                Self::draw_glyph(canvas, xx + 1.0, y - yadj + 1.0, use_scale, &glyph);
                canvas.backend().set_color(Some(active));
            }

            Self::draw_glyph(canvas, xx, y - yadj, use_scale, &glyph);
            xx += glyph.x_skip * use_scale;
            i += 1;
        }
        canvas.backend().set_color(None);
    }

    fn draw_glyph<B: RenderBackend + ?Sized>(
        canvas: &mut Canvas<'_, B>,
        x: f32,
        y: f32,
        use_scale: f32,
        glyph: &Glyph,
    ) {
        canvas.draw_pic_uv(
            x,
            y,
            glyph.image_width * use_scale,
            glyph.image_height * use_scale,
            glyph.uv,
            glyph.shader,
        );
    }
}

impl Default for FontRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;
    use crate::backend::{DeviceConfig, DrawRect};

    /// Font where 'A' advances 10 and 'B' advances 12, glyph_scale 1.0.
    fn test_font() -> FontInfo {
        let mut glyphs = [Glyph::default(); 256];
        glyphs[b'A' as usize] = Glyph {
            image_width: 9.0,
            image_height: 14.0,
            top: 12.0,
            x_skip: 10.0,
            uv: UvRect::new(0.1, 0.1, 0.2, 0.2),
            shader: ShaderHandle(3),
        };
        glyphs[b'B' as usize] = Glyph {
            image_width: 11.0,
            image_height: 14.0,
            top: 12.0,
            x_skip: 12.0,
            uv: UvRect::new(0.2, 0.1, 0.3, 0.2),
            shader: ShaderHandle(3),
        };
        FontInfo { glyphs, glyph_scale: 1.0 }
    }

    fn canvas_640(backend: &mut RecordingBackend) -> Canvas<'_, RecordingBackend> {
        let white = backend.register_shader("white");
        Canvas::new(backend, DeviceConfig::new(640, 480), white)
    }

    // -------------------------------------------------------------------------
    // Measurement Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_text_width_sums_advances_and_skips_escapes() {
        let mut renderer = FontRenderer::new();
        renderer.set_font(test_font());

        assert_eq!(renderer.text_width("AB", 1.0), 22.0);
        assert_eq!(renderer.text_width("^1AB", 1.0), 22.0, "escapes measure as zero");
        assert_eq!(renderer.text_width("AB", 0.5), 11.0, "scale applies to the sum");
    }

    #[test]
    fn test_glyph_scale_folds_into_width() {
        let mut font = test_font();
        font.glyph_scale = 2.0;
        let mut renderer = FontRenderer::new();
        renderer.set_font(font);

        assert_eq!(renderer.text_width("AB", 0.25), 11.0);
    }

    // -------------------------------------------------------------------------
    // Missing-Font Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_font_is_a_quiet_noop() {
        let renderer = FontRenderer::new();
        assert_eq!(renderer.text_width("AB", 1.0), 0.0);

        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(&mut canvas, 0.0, 0.0, 1.0, colors::WHITE, "AB", TextStyle::Shadowed);
        }
        assert!(
            backend.draws().is_empty() && backend.colors().is_empty(),
            "drawing without a font must touch nothing"
        );
    }

    // -------------------------------------------------------------------------
    // Drawing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_baseline_and_advance() {
        let mut renderer = FontRenderer::new();
        renderer.set_font(test_font());
        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(&mut canvas, 50.0, 100.0, 1.0, colors::WHITE, "AB", TextStyle::Normal);
        }

        let draws = backend.draws();
        assert_eq!(draws.len(), 2);
        // Glyphs rise above the baseline by their top bearing.
        assert_eq!(draws[0].0, DrawRect::new(50.0, 88.0, 9.0, 14.0));
        assert_eq!(draws[1].0, DrawRect::new(60.0, 88.0, 11.0, 14.0));
    }

    #[test]
    fn test_shadow_styles() {
        let mut renderer = FontRenderer::new();
        renderer.set_font(test_font());

        // Full shadow: black at the text's alpha, offset (+1, +1).
        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(&mut canvas, 50.0, 100.0, 1.0, colors::WHITE, "A", TextStyle::Shadowed);
        }
        let draws = backend.draws();
        assert_eq!(draws.len(), 2, "shadow then face");
        assert_eq!(draws[0].0, DrawRect::new(51.0, 89.0, 9.0, 14.0));
        assert_eq!(draws[1].0, DrawRect::new(50.0, 88.0, 9.0, 14.0));
        assert!(backend.colors().contains(&Some(colors::BLACK)));

        // Light shadow: 70% of the text's alpha.
        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(
                &mut canvas,
                50.0,
                100.0,
                1.0,
                colors::WHITE,
                "A",
                TextStyle::ShadowedLight,
            );
        }
        assert!(backend.colors().contains(&Some(colors::BLACK.with_alpha(0.7))));
    }

    #[test]
    fn test_black_text_gets_grey_shadow() {
        let mut renderer = FontRenderer::new();
        renderer.set_font(test_font());
        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(&mut canvas, 0.0, 0.0, 1.0, colors::BLACK, "A", TextStyle::Shadowed);
        }
        assert!(
            backend.colors().contains(&Some(Rgba::rgb(0.2, 0.2, 0.2))),
            "a black shadow under black text would vanish"
        );
    }

    #[test]
    fn test_escape_recolors_face_and_shadow() {
        let mut renderer = FontRenderer::new();
        renderer.set_font(test_font());
        let mut backend = RecordingBackend::new();
        {
            let mut canvas = canvas_640(&mut backend);
            renderer.draw_text(&mut canvas, 0.0, 0.0, 1.0, colors::WHITE, "^1A", TextStyle::Normal);
        }
        assert!(backend.colors().contains(&Some(colors::COLOR_TABLE[1])));
        assert_eq!(backend.draws().len(), 1, "the escape pair itself draws nothing");
    }
}
