//! Top-level per-frame screen composition.
//!
//! [`Screen::update`] is the single entry point the client calls once per
//! rendered frame. It walks the current [`ConnectionState`], hands control
//! to the right subsystem for the base layer (menu, connect screen, world,
//! cinematic), stacks the in-game overlays and the console on top, and
//! closes the frame. On stereo devices the whole composition runs twice,
//! once per eye.
//!
//! A recursion guard panics if composition re-enters itself more than
//! twice; a subsystem drawing by calling back into the screen layer is a
//! programming error that would otherwise loop forever.

use log::debug;

use crate::backend::{DeviceConfig, FrameTimings, RenderBackend, ShaderHandle, StereoEye};
use crate::canvas::Canvas;
use crate::charset::CharsetRenderer;
use crate::colors;
use crate::config::ScreenConfig;
use crate::font::{FontInfo, FontRenderer};
use crate::graph::DebugGraph;
use crate::overlays;
use crate::session::{ClientSystems, ConnectionState, MenuId, SessionSnapshot};

/// Flat-white reference shader for untextured fills.
const WHITE_SHADER_NAME: &str = "white";
/// 16x16 bitmap charset sheet.
const CHARSET_SHADER_NAME: &str = "gfx/2d/bigchars";

// =============================================================================
// Recursion Guard
// =============================================================================

/// Detects composition re-entering itself.
///
/// Depth resets to zero only when a frame completes normally, so a frame
/// abandoned mid-composition (a subsystem error path unwinding back into
/// the driver) leaves the guard armed and the next re-entry trips it.
struct FrameGuard {
    depth: u32,
}

impl FrameGuard {
    const fn new() -> Self {
        Self { depth: 0 }
    }

    fn enter(&mut self) {
        self.depth += 1;
        if self.depth > 2 {
            panic!("screen composition recursively called");
        }
    }

    fn finish(&mut self) {
        self.depth = 0;
    }
}

// =============================================================================
// Screen
// =============================================================================

/// The screen compositor: owns the 2D drawing machinery and per-frame
/// debug state, and composes one frame per [`Screen::update`] call.
pub struct Screen {
    config: ScreenConfig,
    charset: CharsetRenderer,
    font: FontRenderer,
    graph: DebugGraph,
    guard: FrameGuard,
    white_shader: ShaderHandle,
    last_timings: Option<FrameTimings>,
}

impl Screen {
    /// Register the shaders the compositor itself needs and build the
    /// drawing machinery. Call once, after the backend is up.
    pub fn new<B: RenderBackend + ?Sized>(config: ScreenConfig, backend: &mut B) -> Self {
        let white_shader = backend.register_shader(WHITE_SHADER_NAME);
        let charset_shader = backend.register_shader(CHARSET_SHADER_NAME);
        Self {
            config,
            charset: CharsetRenderer::new(charset_shader),
            font: FontRenderer::new(),
            graph: DebugGraph::new(),
            guard: FrameGuard::new(),
            white_shader,
            last_timings: None,
        }
    }

    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ScreenConfig {
        &mut self.config
    }

    /// Install the proportional font once its assets are loaded.
    pub fn set_font(&mut self, font: FontInfo) {
        self.font.set_font(font);
    }

    /// Feed one debug graph sample.
    pub fn record_graph(&mut self, value: f32, color: u8) {
        self.graph.record(value, color);
    }

    /// The bitmap charset renderer, for callers composing their own text.
    pub const fn charset(&self) -> &CharsetRenderer {
        &self.charset
    }

    /// The proportional font renderer.
    pub const fn font(&self) -> &FontRenderer {
        &self.font
    }

    /// Renderer timings captured at the end of the last frame, when
    /// perf stats are enabled.
    pub const fn last_timings(&self) -> Option<FrameTimings> {
        self.last_timings
    }

    // -------------------------------------------------------------------------
    // Frame Composition
    // -------------------------------------------------------------------------

    /// Compose and close one frame.
    ///
    /// On stereo devices the composition runs once per eye before the
    /// frame closes. Panics if called re-entrantly from a subsystem.
    pub fn update<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        device: DeviceConfig,
        systems: &mut dyn ClientSystems,
        session: &SessionSnapshot<'_>,
    ) {
        self.guard.enter();

        if device.stereo {
            self.draw_field(backend, device, StereoEye::Left, systems, session);
            self.draw_field(backend, device, StereoEye::Right, systems, session);
        } else {
            self.draw_field(backend, device, StereoEye::Center, systems, session);
        }

        self.last_timings = backend.end_frame(self.config.show_perf_stats);
        self.guard.finish();
    }

    /// Compose the full screen stack for one eye.
    fn draw_field<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        device: DeviceConfig,
        eye: StereoEye,
        systems: &mut dyn ClientSystems,
        session: &SessionSnapshot<'_>,
    ) {
        backend.begin_frame(eye);
        let mut canvas = Canvas::new(backend, device, self.white_shader);

        // Wide devices show pillarbox bars beside the 4:3 UI whenever the
        // world isn't covering the whole screen; clear them to black.
        if session.state != ConnectionState::Active
            && session.state != ConnectionState::Cinematic
            && device.is_wide()
        {
            canvas.fill_device_rect(
                0.0,
                0.0,
                device.width as f32,
                device.height as f32,
                colors::BLACK,
            );
        }

        let Some(menu) = systems.menu() else {
            debug!("screen update before menu subsystem is ready; skipping frame");
            return;
        };
        let menu_fullscreen = menu.is_fullscreen();

        if !menu_fullscreen {
            match session.state {
                ConnectionState::Disconnected => {
                    // Nothing to show; force the main menu up.
                    systems.stop_all_sounds();
                    if let Some(menu) = systems.menu() {
                        menu.set_active_menu(MenuId::Main);
                    }
                }
                ConnectionState::Connecting
                | ConnectionState::Challenging
                | ConnectionState::Connected => {
                    if let Some(menu) = systems.menu() {
                        menu.refresh(session.realtime);
                        menu.draw_connect_screen(false);
                    }
                }
                ConnectionState::Loading | ConnectionState::Primed => {
                    // The partially loaded world shows through the
                    // connect overlay.
                    systems.render_world(eye);
                    if let Some(menu) = systems.menu() {
                        menu.refresh(session.realtime);
                        menu.draw_connect_screen(true);
                    }
                }
                ConnectionState::Active => {
                    systems.render_world(eye);
                    overlays::draw_demo_recording(&mut canvas, &self.font, session);
                    if session.sniper_drawn && self.config.persistent_crosshair {
                        overlays::draw_persistent_crosshair(&mut canvas, &self.config, session);
                    }
                    overlays::draw_clock(&mut canvas, &self.charset, &self.config, session);
                    overlays::draw_spree(&mut canvas, &self.charset, &self.config, session);
                }
                ConnectionState::Cinematic => {
                    systems.draw_cinematic();
                }
            }
        }

        // The menu draws over the base layer whenever it holds input.
        if session.menu_owns_input {
            if let Some(menu) = systems.menu() {
                menu.refresh(session.realtime);
            }
        }

        // Console on top of everything but the debug graph.
        systems.draw_console();

        if self.config.graph_enabled() {
            self.graph.render(
                &mut canvas,
                self.config.graph_height,
                self.config.graph_scale,
                self.config.graph_shift,
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
