//! Renderer backend interface and device description.
//!
//! The GPU/rasterizer lives outside this crate; everything here is the seam
//! it is reached through. The composer and both text renderers are generic
//! over [`RenderBackend`], the way a draw function is generic over its
//! display target, so tests run against a recording mock and the engine
//! plugs in its real command recorder.
//!
//! # Backend Contract
//!
//! - `register_shader` caches by name: registering the same name twice
//!   returns the same handle.
//! - Draw submissions are infallible; a backend that can fail queues or
//!   drops internally.
//! - Color state is global to the backend. Every component that sets a
//!   color resets it to the default (`None`) before returning, on every
//!   exit path, so later draws are never mistakenly tinted.

use crate::colors::Rgba;

// =============================================================================
// Handles and Geometry
// =============================================================================

/// Opaque handle to a registered shader/material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Axis-aligned rectangle in device pixels, as handed to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl DrawRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self { Self { x, y, w, h } }
}

/// Texture window for a stretch-pic draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvRect {
    pub s1: f32,
    pub t1: f32,
    pub s2: f32,
    pub t2: f32,
}

impl UvRect {
    pub const fn new(s1: f32, t1: f32, s2: f32, t2: f32) -> Self { Self { s1, t1, s2, t2 } }

    /// The full texture, (0,0)-(1,1). Used by picture draws.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Degenerate zero window. Used for untextured fills against the flat
    /// white shader.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

// =============================================================================
// Device and Frame Types
// =============================================================================

/// Physical display configuration, read each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Device width in pixels.
    pub width: u32,
    /// Device height in pixels.
    pub height: u32,
    /// True when rendering stereoscopically (one field per eye).
    pub stereo: bool,
}

impl DeviceConfig {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height, stereo: false }
    }

    /// True when the device is wider than the 4:3 virtual baseline and
    /// letterboxed modes need their side bars cleared.
    pub const fn is_wide(&self) -> bool {
        self.width * 480 > self.height * 640
    }
}

/// Which field of a (possibly stereo) frame is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StereoEye {
    Left,
    Right,
    Center,
}

/// Frontend/backend frame timing captured at end-of-frame when performance
/// statistics are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTimings {
    pub frontend_ms: i32,
    pub backend_ms: i32,
}

// =============================================================================
// Backend Trait
// =============================================================================

/// The renderer backend consumed by every draw call in this crate.
pub trait RenderBackend {
    /// Resolve a shader by name, registering it on first use. Repeated
    /// registrations of the same name return the same handle.
    fn register_shader(&mut self, name: &str) -> ShaderHandle;

    /// Set the active tint color. `None` resets to the default (no tint).
    fn set_color(&mut self, color: Option<Rgba>);

    /// Draw a textured quad: `rect` in device pixels, `uv` selecting the
    /// texture window of `shader`.
    fn draw_stretch_pic(&mut self, rect: DrawRect, uv: UvRect, shader: ShaderHandle);

    /// Begin a render field for the given eye.
    fn begin_frame(&mut self, eye: StereoEye);

    /// End the frame, optionally capturing frontend/backend timings.
    fn end_frame(&mut self, capture_timings: bool) -> Option<FrameTimings>;
}

// =============================================================================
// Recording Mock (test support)
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::recording::RecordingBackend;
    use super::*;

    #[test]
    fn test_is_wide() {
        assert!(DeviceConfig::new(1280, 720).is_wide(), "16:9 is wider than 4:3");
        assert!(!DeviceConfig::new(640, 480).is_wide(), "4:3 is the baseline");
        assert!(!DeviceConfig::new(1024, 768).is_wide(), "scaled 4:3 is not wide");
    }

    #[test]
    fn test_uv_constants() {
        assert_eq!(UvRect::FULL, UvRect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(UvRect::ZERO, UvRect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_recording_backend_caches_by_name() {
        let mut backend = RecordingBackend::new();
        let a = backend.register_shader("white");
        let b = backend.register_shader("gfx/2d/bigchars");
        let a2 = backend.register_shader("white");

        assert_eq!(a, a2, "re-registering a name should return the same handle");
        assert_ne!(a, b, "different names should get different handles");
        assert_eq!(backend.shader_name(a), "white");
    }

    #[test]
    fn test_recording_backend_timings() {
        let mut backend = RecordingBackend::new();
        assert!(backend.end_frame(false).is_none(), "no capture when disabled");
        assert!(backend.end_frame(true).is_some(), "capture when enabled");
    }
}
