//! Virtual-to-device coordinate transform and picture primitives.
//!
//! All UI layout is authored in the fixed 640x480 virtual space; the
//! [`Canvas`] scales it to the actual device resolution on the way to the
//! backend. A `Canvas` bundles the backend handle, the device config, and
//! the cached flat-white shader, and is threaded through every draw
//! function for the frame.
//!
//! Aside from a handful of deliberately native-resolution paths (small
//! console chars, the debug graph), every draw passes through the
//! transform exactly once.

use crate::backend::{DeviceConfig, DrawRect, RenderBackend, ShaderHandle, UvRect};
use crate::colors::Rgba;
use crate::config::{VIRTUAL_HEIGHT, VIRTUAL_WIDTH};

// =============================================================================
// Virtual Rectangle
// =============================================================================

/// Rectangle in virtual 640x480 units where each field may be absent.
///
/// Absent fields pass through the transform untouched. This replaces the
/// original's nullable in/out pointer parameters with explicit presence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VirtualRect {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
}

impl VirtualRect {
    /// Rectangle with all four fields present.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x: Some(x), y: Some(y), w: Some(w), h: Some(h) }
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// Per-frame drawing handle: backend + device + flat-white shader.
pub struct Canvas<'a, B: RenderBackend + ?Sized> {
    backend: &'a mut B,
    /// Device configuration for this frame.
    pub device: DeviceConfig,
    white_shader: ShaderHandle,
}

impl<'a, B: RenderBackend + ?Sized> Canvas<'a, B> {
    pub fn new(backend: &'a mut B, device: DeviceConfig, white_shader: ShaderHandle) -> Self {
        Self { backend, device, white_shader }
    }

    /// Direct access to the backend, for color state and raw draws.
    pub fn backend(&mut self) -> &mut B { self.backend }

    /// The flat-white reference shader used for untextured fills.
    pub const fn white_shader(&self) -> ShaderHandle { self.white_shader }

    // -------------------------------------------------------------------------
    // Coordinate Transform
    // -------------------------------------------------------------------------

    /// Scale a virtual rectangle to device pixels: x/w by `width/640`,
    /// y/h by `height/480`. Absent fields are left untouched. Pure.
    pub fn transform(&self, rect: &VirtualRect) -> VirtualRect {
        let xscale = self.device.width as f32 / VIRTUAL_WIDTH;
        let yscale = self.device.height as f32 / VIRTUAL_HEIGHT;
        VirtualRect {
            x: rect.x.map(|x| x * xscale),
            y: rect.y.map(|y| y * yscale),
            w: rect.w.map(|w| w * xscale),
            h: rect.h.map(|h| h * yscale),
        }
    }

    /// Scale a full virtual rectangle into a device-space draw rectangle.
    pub fn to_device(&self, x: f32, y: f32, w: f32, h: f32) -> DrawRect {
        let xscale = self.device.width as f32 / VIRTUAL_WIDTH;
        let yscale = self.device.height as f32 / VIRTUAL_HEIGHT;
        DrawRect::new(x * xscale, y * yscale, w * xscale, h * yscale)
    }

    // -------------------------------------------------------------------------
    // Picture Primitives (virtual coordinates)
    // -------------------------------------------------------------------------

    /// Transform and draw a quad with an arbitrary texture window.
    pub fn draw_pic_uv(&mut self, x: f32, y: f32, w: f32, h: f32, uv: UvRect, shader: ShaderHandle) {
        let rect = self.to_device(x, y, w, h);
        self.backend.draw_stretch_pic(rect, uv, shader);
    }

    /// Transform and draw a full-texture quad.
    pub fn draw_pic(&mut self, x: f32, y: f32, w: f32, h: f32, shader: ShaderHandle) {
        self.draw_pic_uv(x, y, w, h, UvRect::FULL, shader);
    }

    /// Resolve a shader by name, then transform and draw a full-texture quad.
    pub fn draw_named_pic(&mut self, x: f32, y: f32, w: f32, h: f32, name: &str) {
        debug_assert!(w != 0.0, "zero-width pic: {name}");
        let shader = self.backend.register_shader(name);
        self.draw_pic(x, y, w, h, shader);
    }

    /// Fill a transformed rectangle with a solid color.
    ///
    /// Pushes `color`, draws a zero-UV quad against the white shader, then
    /// resets the color state to default before returning.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.backend.set_color(Some(color));
        let rect = self.to_device(x, y, w, h);
        self.backend.draw_stretch_pic(rect, UvRect::ZERO, self.white_shader);
        self.backend.set_color(None);
    }

    // -------------------------------------------------------------------------
    // Picture Primitives (device coordinates)
    // -------------------------------------------------------------------------

    /// Draw a quad directly in device pixels, skipping the transform.
    pub fn draw_device_pic(&mut self, rect: DrawRect, uv: UvRect, shader: ShaderHandle) {
        self.backend.draw_stretch_pic(rect, uv, shader);
    }

    /// Fill a device-pixel rectangle with a solid color, with the same
    /// color push/reset discipline as [`Canvas::fill_rect`].
    pub fn fill_device_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.backend.set_color(Some(color));
        self.backend
            .draw_stretch_pic(DrawRect::new(x, y, w, h), UvRect::ZERO, self.white_shader);
        self.backend.set_color(None);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
