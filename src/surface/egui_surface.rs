use egui::{Align2, Color32, FontId, Painter, Rect, Stroke as EguiStroke, Vec2};

use super::{GlyphMetrics, Surface};
use crate::geometry::{Point, Segment};

/// Paints into an egui [`Painter`], mapping surface-local coordinates onto `rect`.
///
/// egui is immediate mode, so "clearing" means filling the canvas rect with the
/// background color at the start of every frame.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, point: Point) -> Point {
        self.rect.min + point.to_vec2()
    }
}

impl GlyphMetrics for EguiSurface<'_> {
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2 {
        self.painter
            .layout_no_wrap(glyph.to_owned(), FontId::monospace(font_px), Color32::WHITE)
            .size()
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn draw_segment(&mut self, segment: &Segment, color: Color32, thickness: f32) {
        self.painter.line_segment(
            [self.to_screen(segment.start), self.to_screen(segment.end)],
            EguiStroke::new(thickness, color),
        );
    }

    fn draw_glyph(&mut self, glyph: &str, origin: Point, font_px: f32, color: Color32) {
        self.painter.text(
            self.to_screen(origin),
            Align2::LEFT_TOP,
            glyph,
            FontId::monospace(font_px),
            color,
        );
    }
}

/// Glyph metrics backed by the live egui font atlas.
///
/// Only valid once the first frame has started; input events only arrive inside a
/// frame, so the input path never measures earlier than that.
#[derive(Clone)]
pub struct EguiMetrics {
    ctx: egui::Context,
}

impl EguiMetrics {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl GlyphMetrics for EguiMetrics {
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(glyph.to_owned(), FontId::monospace(font_px), Color32::WHITE)
                .size()
        })
    }
}
