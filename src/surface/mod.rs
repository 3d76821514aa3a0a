//! Drawable surfaces.
//!
//! The core never talks to a GPU, a canvas element or a pixel buffer directly.
//! Everything it paints goes through [`Surface`], which only has to clear itself,
//! draw a straight segment and draw a glyph. Glyph centering needs measured
//! glyph boxes, which is what [`GlyphMetrics`] provides.

use egui::{Color32, Vec2, vec2};

use crate::geometry::{Point, Segment};

mod egui_surface;
mod raster;
mod recording;

pub use egui_surface::{EguiMetrics, EguiSurface};
pub use raster::RasterSurface;
pub use recording::{PaintOp, RecordingSurface};

/// Measures glyph boxes for centering math.
pub trait GlyphMetrics {
    /// Width and height (ascent + descent) of `glyph` at `font_px`.
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2;
}

/// Something the render pipeline can wash and paint onto.
///
/// Coordinates are surface-local. Implementations must be deterministic: the same
/// sequence of calls on a cleared surface yields the same output.
pub trait Surface: GlyphMetrics {
    /// Wash the full bounds of the surface.
    fn clear(&mut self);

    /// Draw one straight line of uniform color and thickness.
    fn draw_segment(&mut self, segment: &Segment, color: Color32, thickness: f32);

    /// Draw `glyph` with its box's top-left corner at `origin`.
    fn draw_glyph(&mut self, glyph: &str, origin: Point, font_px: f32, color: Color32);
}

/// Font-free metrics: ASCII glyphs are 0.6 em wide, everything else (emoji, CJK) a
/// full em. Height is always one em.
///
/// Used when no real font is around, e.g. headless tests or an export without a
/// configured font.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    pub const ASCII_ADVANCE: f32 = 0.6;
}

impl GlyphMetrics for MonospaceMetrics {
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2 {
        let ems: f32 = glyph
            .chars()
            .map(|c| if c.is_ascii() { Self::ASCII_ADVANCE } else { 1.0 })
            .sum();
        vec2(ems * font_px, font_px)
    }
}
