//! Screen configuration: per-frame read-only toggles and the virtual
//! coordinate space.
//!
//! Configuration storage/registration belongs to the engine; the composer
//! only reads a [`ScreenConfig`] each frame. Defaults mirror the values the
//! original client registers at screen init.

// =============================================================================
// Virtual Coordinate Space
// =============================================================================

/// Width of the fixed virtual coordinate space all UI layout is authored in.
pub const VIRTUAL_WIDTH: f32 = 640.0;

/// Height of the fixed virtual coordinate space.
pub const VIRTUAL_HEIGHT: f32 = 480.0;

/// Horizontal center of the virtual space. Used for centering HUD text.
pub const VIRTUAL_CENTER_X: f32 = VIRTUAL_WIDTH / 2.0;

/// Vertical center of the virtual space.
pub const VIRTUAL_CENTER_Y: f32 = VIRTUAL_HEIGHT / 2.0;

// =============================================================================
// Screen Configuration
// =============================================================================

/// Read-only per-frame configuration consumed by the frame composer and the
/// HUD overlays.
#[derive(Clone, Debug)]
pub struct ScreenConfig {
    // -------------------------------------------------------------------------
    // Diagnostic graph
    // -------------------------------------------------------------------------
    /// Plot per-frame time on the debug graph.
    pub timegraph: bool,
    /// Draw the debug graph overlay.
    pub debuggraph: bool,
    /// Movement-debugging overlay flag; also forces the graph on.
    pub debug_move: bool,
    /// Graph strip height in device rows.
    pub graph_height: u32,
    /// Multiplier applied to each sample value before plotting.
    pub graph_scale: f32,
    /// Offset added to each scaled sample value before plotting.
    pub graph_shift: f32,

    // -------------------------------------------------------------------------
    // Clock overlay
    // -------------------------------------------------------------------------
    /// Draw the wall-clock overlay during gameplay.
    pub draw_clock: bool,
    /// Palette index for the clock text.
    pub clock_color: u8,
    /// Clock glyph size in virtual units.
    pub clock_font_size: f32,
    /// Clock x position, in tens of virtual units.
    pub clock_pos_x: f32,
    /// Clock y position, in tens of virtual units.
    pub clock_pos_y: f32,

    // -------------------------------------------------------------------------
    // Kill-streak overlay
    // -------------------------------------------------------------------------
    /// Kill-streak display mode: 0 off, 1 counter text, 2 icons,
    /// 3 counter text and icons.
    pub draw_spree: u8,
    /// Crosshair-names layout variant; variant 0 shifts the kill counter up
    /// one text row to avoid overlap.
    pub crosshair_names_type: i32,

    // -------------------------------------------------------------------------
    // Persistent crosshair overlay
    // -------------------------------------------------------------------------
    /// Keep the crosshair drawn while a scoped weapon hides the normal one.
    pub persistent_crosshair: bool,
    /// Crosshair size in virtual units.
    pub crosshair_size: f32,

    // -------------------------------------------------------------------------
    // Global toggles
    // -------------------------------------------------------------------------
    /// Master 2D/HUD toggle.
    pub draw_2d: bool,
    /// Capture frontend/backend frame timings at end-of-frame.
    pub show_perf_stats: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            timegraph: false,
            debuggraph: false,
            debug_move: false,
            graph_height: 32,
            graph_scale: 1.0,
            graph_shift: 0.0,
            draw_clock: false,
            clock_color: 7,
            clock_font_size: 8.0,
            clock_pos_x: 29.0,
            clock_pos_y: 1.0,
            draw_spree: 0,
            crosshair_names_type: 0,
            persistent_crosshair: false,
            crosshair_size: 24.0,
            draw_2d: true,
            show_perf_stats: false,
        }
    }
}

impl ScreenConfig {
    /// True when any diagnostic flag wants the debug graph drawn.
    pub const fn graph_enabled(&self) -> bool {
        self.debuggraph || self.timegraph || self.debug_move
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_registration_values() {
        let config = ScreenConfig::default();

        assert_eq!(config.graph_height, 32, "graphheight defaults to 32");
        assert_eq!(config.graph_scale, 1.0, "graphscale defaults to 1");
        assert_eq!(config.graph_shift, 0.0, "graphshift defaults to 0");
        assert_eq!(config.clock_color, 7, "clock color defaults to white");
        assert_eq!(config.clock_font_size, 8.0, "clock font size defaults to 8");
        assert_eq!(config.clock_pos_x, 29.0);
        assert_eq!(config.clock_pos_y, 1.0);
        assert_eq!(config.draw_spree, 0, "kill streak display defaults off");
        assert!(!config.draw_clock, "clock defaults off");
        assert!(config.draw_2d, "2D drawing defaults on");
    }

    #[test]
    fn test_graph_enabled_any_flag() {
        let mut config = ScreenConfig::default();
        assert!(!config.graph_enabled(), "graph off by default");

        config.timegraph = true;
        assert!(config.graph_enabled(), "timegraph forces the graph on");

        config.timegraph = false;
        config.debug_move = true;
        assert!(config.graph_enabled(), "debug_move forces the graph on");
    }
}
