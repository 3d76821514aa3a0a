use egui::{Color32, Vec2};

use super::{GlyphMetrics, MonospaceMetrics, Surface};
use crate::geometry::{Point, Segment};

/// A single paint call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear,
    Segment {
        segment: Segment,
        color: Color32,
        thickness: f32,
    },
    Glyph {
        glyph: String,
        origin: Point,
        font_px: f32,
        color: Color32,
    },
}

/// Surface that keeps a display list instead of pixels.
///
/// `clear` empties the list and records a `Clear`, so after a redraw the list holds
/// exactly what one pass painted.
pub struct RecordingSurface {
    ops: Vec<PaintOp>,
    metrics: Box<dyn GlyphMetrics>,
}

impl std::fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("ops", &self.ops)
            .finish_non_exhaustive()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(MonospaceMetrics))
    }

    pub fn with_metrics(metrics: Box<dyn GlyphMetrics>) -> Self {
        Self {
            ops: Vec::new(),
            metrics,
        }
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn segment_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Segment { .. }))
            .count()
    }

    pub fn glyph_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Glyph { .. }))
            .count()
    }
}

impl GlyphMetrics for RecordingSurface {
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2 {
        self.metrics.measure_glyph(glyph, font_px)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(PaintOp::Clear);
    }

    fn draw_segment(&mut self, segment: &Segment, color: Color32, thickness: f32) {
        self.ops.push(PaintOp::Segment {
            segment: *segment,
            color,
            thickness,
        });
    }

    fn draw_glyph(&mut self, glyph: &str, origin: Point, font_px: f32, color: Color32) {
        self.ops.push(PaintOp::Glyph {
            glyph: glyph.to_owned(),
            origin,
            font_px,
            color,
        });
    }
}
