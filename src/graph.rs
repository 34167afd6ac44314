//! Debug value graph.
//!
//! A fixed ring of 1024 samples, one `(value, palette color)` pair per
//! recorded frame. Rendering paints the newest sample in the rightmost
//! device column and walks backwards, one column per sample, over a black
//! band along the bottom of the screen. The cursor only ever advances;
//! stale samples are simply overwritten on the next lap.

use crate::backend::{DrawRect, RenderBackend, UvRect};
use crate::canvas::Canvas;
use crate::colors;

/// Ring capacity. Power of two so the cursor masks instead of dividing.
pub const GRAPH_SAMPLES: usize = 1024;
const GRAPH_MASK: usize = GRAPH_SAMPLES - 1;

/// One recorded sample: a raw value and a palette color index.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphSample {
    pub value: f32,
    pub color: u8,
}

// =============================================================================
// Debug Graph
// =============================================================================

/// Ring buffer of debug samples with a bottom-of-screen bar renderer.
pub struct DebugGraph {
    samples: [GraphSample; GRAPH_SAMPLES],
    cursor: usize,
}

impl DebugGraph {
    pub const fn new() -> Self {
        Self {
            samples: [GraphSample { value: 0.0, color: 0 }; GRAPH_SAMPLES],
            cursor: 0,
        }
    }

    /// Record one sample, overwriting the oldest slot once the ring is full.
    pub fn record(&mut self, value: f32, color: u8) {
        self.samples[self.cursor & GRAPH_MASK] = GraphSample { value, color };
        self.cursor = self.cursor.wrapping_add(1);
    }

    /// The sample recorded `n` records ago; `0` is the most recent.
    fn sample_back(&self, n: usize) -> GraphSample {
        self.samples[self.cursor.wrapping_sub(1).wrapping_sub(n) & GRAPH_MASK]
    }

    /// Draw the graph along the bottom edge of the device.
    ///
    /// Each column is one device pixel wide; the newest sample occupies the
    /// rightmost column. Values are mapped through `value * scale + shift`,
    /// negative results folded up by whole multiples of `height`, and the
    /// bar height taken modulo `height`.
    pub fn render<B: RenderBackend + ?Sized>(
        &self,
        canvas: &mut Canvas<'_, B>,
        height: u32,
        scale: f32,
        shift: f32,
    ) {
        if height == 0 {
            return;
        }
        let dev_w = canvas.device.width as f32;
        let dev_h = canvas.device.height as f32;
        let heightf = height as f32;
        let white = canvas.white_shader();

        canvas.fill_device_rect(0.0, dev_h - heightf, dev_w, heightf, colors::COLOR_TABLE[0]);

        for a in 0..canvas.device.width as usize {
            let sample = self.sample_back(a);
            let mut v = sample.value * scale + shift;
            if v < 0.0 {
                v += heightf * (1.0 + ((-v / heightf) as i32) as f32);
            }
            let bar = ((v as i32) % height as i32) as f32;

            canvas.backend().set_color(Some(colors::COLOR_TABLE[(sample.color & 7) as usize]));
            canvas.draw_device_pic(
                DrawRect::new(dev_w - 1.0 - a as f32, dev_h - bar, 1.0, bar),
                UvRect::ZERO,
                white,
            );
        }
        canvas.backend().set_color(None);
    }
}

impl Default for DebugGraph {
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
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::backend::DeviceConfig;

    // -------------------------------------------------------------------------
    // Ring Buffer Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_newest_sample_is_back_zero() {
        let mut graph = DebugGraph::new();
        graph.record(1.0, 1);
        graph.record(2.0, 2);

        assert_eq!(graph.sample_back(0), GraphSample { value: 2.0, color: 2 });
        assert_eq!(graph.sample_back(1), GraphSample { value: 1.0, color: 1 });
    }

    #[test]
    fn test_ring_overwrites_after_full_lap() {
        let mut graph = DebugGraph::new();
        for i in 0..(GRAPH_SAMPLES + 1) {
            graph.record(i as f32, 0);
        }

        // The 1025th write landed on the 1st sample's slot.
        assert_eq!(graph.sample_back(0).value, GRAPH_SAMPLES as f32);
        assert_eq!(
            graph.sample_back(GRAPH_SAMPLES - 1).value,
            1.0,
            "oldest surviving sample is the second ever recorded"
        );
    }

    // -------------------------------------------------------------------------
    // Render Tests
    // -------------------------------------------------------------------------

    fn render_to(backend: &mut RecordingBackend, graph: &DebugGraph, width: u32, height: u32) {
        let white = backend.register_shader("white");
        let mut canvas = Canvas::new(backend, DeviceConfig::new(width, 480), white);
        graph.render(&mut canvas, height, 1.0, 0.0);
    }

    #[test]
    fn test_zero_height_draws_nothing() {
        let mut backend = RecordingBackend::new();
        let graph = DebugGraph::new();
        render_to(&mut backend, &graph, 640, 0);
        assert!(backend.draws().is_empty());
    }

    #[test]
    fn test_background_band_drawn_first() {
        let mut backend = RecordingBackend::new();
        let graph = DebugGraph::new();
        render_to(&mut backend, &graph, 4, 32);

        let draws = backend.draws();
        assert_eq!(draws[0].0, DrawRect::new(0.0, 448.0, 4.0, 32.0));
        assert_eq!(draws.len(), 1 + 4, "band plus one bar per device column");
    }

    #[test]
    fn test_newest_sample_in_rightmost_column() {
        let mut backend = RecordingBackend::new();
        let mut graph = DebugGraph::new();
        graph.record(10.0, 1);
        graph.record(20.0, 2);
        render_to(&mut backend, &graph, 4, 32);

        let draws = backend.draws();
        // draws[0] is the band; column 0 is the rightmost pixel.
        assert_eq!(draws[1].0, DrawRect::new(3.0, 460.0, 1.0, 20.0), "newest sample, height 20");
        assert_eq!(draws[2].0, DrawRect::new(2.0, 470.0, 1.0, 10.0), "previous sample, height 10");
    }

    #[test]
    fn test_negative_values_fold_into_range() {
        let mut backend = RecordingBackend::new();
        let mut graph = DebugGraph::new();
        // -150 folds up by 5*32 = 160 to 10.
        graph.record(-150.0, 0);
        render_to(&mut backend, &graph, 1, 32);

        let draws = backend.draws();
        assert_eq!(draws[1].0.h, 10.0);
        assert_eq!(draws[1].0.y, 470.0);
    }

    #[test]
    fn test_bar_colors_follow_palette_and_reset() {
        let mut backend = RecordingBackend::new();
        let mut graph = DebugGraph::new();
        graph.record(5.0, 9); // masks to palette index 1
        render_to(&mut backend, &graph, 1, 32);

        let colors_seen = backend.colors();
        assert!(colors_seen.contains(&Some(colors::COLOR_TABLE[1])));
        assert_eq!(*colors_seen.last().unwrap(), None, "color resets after the graph");

        // fill_device_rect handles its own color discipline too.
        assert!(backend.calls.iter().any(|c| matches!(c, Call::SetColor(Some(_)))));
    }
}
