//! In-game HUD overlays drawn by the screen layer itself.
//!
//! These sit on top of the world render during active play: the demo
//! recording banner, the kill spree counter, the wall clock, and the
//! persistent crosshair dot. Each one checks its own gates and returns
//! early, so composition just calls them all every frame.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::backend::RenderBackend;
use crate::canvas::Canvas;
use crate::charset::CharsetRenderer;
use crate::colors;
use crate::config::{ScreenConfig, VIRTUAL_CENTER_X, VIRTUAL_CENTER_Y};
use crate::font::{FontRenderer, TextStyle};
use crate::session::SessionSnapshot;

/// Longest demo name shown before truncation kicks in.
const DEMO_NAME_MAX: usize = 40;
/// Scale of the demo banner text.
const DEMO_TEXT_SCALE: f32 = 0.18;

/// Spree counter threshold where the digit readout switches to an icon.
const SPREE_ICON_THRESHOLD: u32 = 6;
const SPREE_ICON: &str = "skull.tga";

// =============================================================================
// Demo Recording Banner
// =============================================================================

/// Centered `^1[DEMO]^7 name: ^1NNNkB` banner near the top of the screen.
///
/// Skipped when not recording, or when the recording is a server-side
/// spectator demo the player did not start.
pub fn draw_demo_recording<B: RenderBackend + ?Sized>(
    canvas: &mut Canvas<'_, B>,
    font: &FontRenderer,
    session: &SessionSnapshot<'_>,
) {
    if !session.demo_recording || session.spectator_demo {
        return;
    }

    let name = strip_extension(session.demo_name);
    let mut text: String<96> = String::new();
    let result = if name.len() > DEMO_NAME_MAX {
        let shown = truncate_on_boundary(name, DEMO_NAME_MAX);
        write!(
            text,
            "^1[DEMO]^7 {}...: ^1{}KB",
            shown,
            session.demo_file_pos / 1024
        )
    } else {
        write!(
            text,
            "^1[DEMO]^7 {}: ^1{}KB",
            name,
            session.demo_file_pos / 1024
        )
    };
    if result.is_err() {
        debug!("demo banner text overflowed its buffer; skipping");
        return;
    }

    let width = font.text_width(&text, DEMO_TEXT_SCALE);
    font.draw_text(
        canvas,
        VIRTUAL_CENTER_X - width / 2.0,
        10.0,
        DEMO_TEXT_SCALE,
        colors::COLOR_TABLE[7],
        &text,
        TextStyle::ShadowedLight,
    );
}

/// Demo names are shown without their file extension.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Cut `s` to at most `max` bytes without splitting a char.
fn truncate_on_boundary(s: &str, max: usize) -> &str {
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// =============================================================================
// Kill Spree Counter
// =============================================================================

/// Kill counter for the current life, as digits, icons, or both.
///
/// Mode 1 or 3 draws a `K:^2n` readout on the left edge; mode 2 or 3
/// draws centered skull icons, collapsing to one icon with a multiplier
/// once the count reaches six.
pub fn draw_spree<B: RenderBackend + ?Sized>(
    canvas: &mut Canvas<'_, B>,
    charset_renderer: &CharsetRenderer,
    config: &ScreenConfig,
    session: &SessionSnapshot<'_>,
) {
    if config.draw_spree == 0 || !config.draw_2d {
        return;
    }
    if session.spectating || !session.pov_is_self || session.paused {
        return;
    }

    // The digit readout shares the left edge with crosshair names; drop
    // down a row when names are disabled.
    let text_y = if config.crosshair_names_type == 0 { 448.0 } else { 458.0 };

    if config.draw_spree & 1 != 0 {
        let mut text: String<16> = String::new();
        if write!(text, "K:^2{}", session.kills).is_ok() {
            charset_renderer.draw_condensed_string(
                canvas,
                53.0,
                text_y,
                8.0,
                &text,
                colors::WHITE,
                false,
            );
        }
    }

    if config.draw_spree > 1 {
        if session.kills < SPREE_ICON_THRESHOLD {
            let icon = 16.0;
            let gap = 2.0;
            let total = session.kills as f32 * (icon + gap) - gap;
            let mut x = VIRTUAL_CENTER_X - total / 2.0;
            for _ in 0..session.kills {
                canvas.draw_named_pic(x, 450.0, icon, icon, SPREE_ICON);
                x += icon + gap;
            }
        } else {
            canvas.draw_named_pic(304.0, 450.0, 16.0, 16.0, SPREE_ICON);
            let mut text: String<16> = String::new();
            if write!(text, "x{}", session.kills).is_ok() {
                charset_renderer.draw_condensed_string(
                    canvas,
                    321.0,
                    456.0,
                    8.0,
                    &text,
                    colors::WHITE,
                    false,
                );
            }
        }
    }
}

// =============================================================================
// Wall Clock
// =============================================================================

/// `HH:MM:SS` wall clock at the configured position, color pinned.
pub fn draw_clock<B: RenderBackend + ?Sized>(
    canvas: &mut Canvas<'_, B>,
    charset_renderer: &CharsetRenderer,
    config: &ScreenConfig,
    session: &SessionSnapshot<'_>,
) {
    if !config.draw_clock {
        return;
    }

    let clock = session.wall_clock;
    let mut text: String<16> = String::new();
    if write!(text, "{:02}:{:02}:{:02}", clock.hour, clock.minute, clock.second).is_err() {
        return;
    }

    charset_renderer.draw_condensed_string(
        canvas,
        config.clock_pos_x * 10.0,
        config.clock_pos_y * 10.0,
        config.clock_font_size,
        &text,
        colors::COLOR_TABLE[(config.clock_color & 7) as usize],
        true,
    );
}

// =============================================================================
// Persistent Crosshair
// =============================================================================

/// Center-screen dot drawn while scoped, so zooming never loses the aim
/// point. Suppressed for spectators and when 2D drawing is off.
pub fn draw_persistent_crosshair<B: RenderBackend + ?Sized>(
    canvas: &mut Canvas<'_, B>,
    config: &ScreenConfig,
    session: &SessionSnapshot<'_>,
) {
    if !config.draw_2d || session.spectating {
        return;
    }
    let size = config.crosshair_size;
    canvas.draw_named_pic(
        VIRTUAL_CENTER_X - size / 2.0,
        VIRTUAL_CENTER_Y - size / 2.0,
        size,
        size,
        "gfx/crosshairs/static/dot.tga",
    );
}

// =============================================================================
// Unit Tests
// =============================================================================
