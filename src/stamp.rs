use egui::Color32;

use crate::geometry::Point;
use crate::surface::Surface;

/// Font pixels per unit of stamp size. A size of 1 is a 7px glyph.
pub const STAMP_SCALE: f32 = 7.0;

/// A single glyph placed on the surface.
///
/// `anchor` is the already-centered draw origin (top-left of the glyph box), not the
/// raw pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    glyph: String,
    size: f32,
    anchor: Point,
    color: Color32,
}

impl Stamp {
    pub fn new(glyph: impl Into<String>, size: f32, color: Color32) -> Self {
        Self::at(glyph, size, Point::ZERO, color)
    }

    pub fn at(glyph: impl Into<String>, size: f32, anchor: Point, color: Color32) -> Self {
        Self {
            glyph: glyph.into(),
            size,
            anchor,
            color,
        }
    }

    /// Overwrite the anchor. Last write wins.
    pub fn reposition(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn font_px(&self) -> f32 {
        self.size * STAMP_SCALE
    }

    pub fn set_glyph(&mut self, glyph: impl Into<String>) {
        self.glyph = glyph.into();
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.draw_glyph(&self.glyph, self.anchor, self.font_px(), self.color);
    }
}
