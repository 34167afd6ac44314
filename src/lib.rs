// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::struct_excessive_bools)] // ScreenConfig and SessionSnapshot use bools appropriately

//! Per-frame screen composition and 2D text rendering for a game client.
//!
//! The client calls [`Screen::update`] once per rendered frame. Composition
//! walks the current [`ConnectionState`] and stacks the screen back to
//! front: base layer (menu, connect screen, 3D world, or cinematic), the
//! in-game overlays, the console, and finally the debug value graph. On
//! stereo devices the whole stack composes once per eye before the frame
//! closes.
//!
//! # Module Map
//!
//! - [`backend`] — the [`RenderBackend`] seam to the actual renderer
//! - [`canvas`] — 640x480 virtual coordinates scaled to device pixels
//! - [`colors`] — the 8-entry palette and `^digit` escape grammar
//! - [`charset`] — fixed-grid bitmap text with drop shadows
//! - [`font`] — proportional text with per-glyph metrics
//! - [`graph`] — the 1024-sample debug value ring
//! - [`overlays`] — demo banner, spree counter, clock, crosshair
//! - [`session`] — per-frame client state and collaborator traits
//! - [`screen`] — the compositor itself
//!
//! All layout is authored in the fixed 640x480 virtual space; only the
//! console charset and the debug graph draw at native device pixels.

pub mod backend;
pub mod canvas;
pub mod charset;
pub mod colors;
pub mod config;
pub mod font;
pub mod graph;
pub mod overlays;
pub mod screen;
pub mod session;

pub use backend::{
    DeviceConfig, DrawRect, FrameTimings, RenderBackend, ShaderHandle, StereoEye, UvRect,
};
pub use canvas::{Canvas, VirtualRect};
pub use charset::CharsetRenderer;
pub use colors::Rgba;
pub use config::ScreenConfig;
pub use font::{FontInfo, FontRenderer, Glyph, TextStyle};
pub use graph::DebugGraph;
pub use screen::Screen;
pub use session::{
    ClientSystems, ConnectionState, MenuId, MenuSystem, SessionSnapshot, WallClock,
};
