use crate::geometry::{Point, centered_origin};
use crate::stamp::STAMP_SCALE;
use crate::surface::Surface;
use crate::tools::{ToolKind, ToolState};

/// Glyph used as the pen cursor.
pub const PEN_CURSOR_GLYPH: &str = "*";
/// Font pixels per unit of thickness for the pen cursor.
pub const PEN_CURSOR_SCALE: f32 = 1.7;

/// Transient indicator following the pointer. Never part of history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviewOverlay {
    active: bool,
    position: Point,
}

impl PreviewOverlay {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Pointer entered the surface.
    pub fn activate(&mut self, position: Point) {
        self.active = true;
        self.position = position;
    }

    /// Pointer left the surface.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Draw the cursor for the active tool, centered the same way stamps are.
    pub fn render(&self, surface: &mut dyn Surface, tools: &ToolState) {
        if !self.active {
            return;
        }

        let (glyph, font_px) = match tools.kind() {
            ToolKind::Stroke => (PEN_CURSOR_GLYPH, tools.thickness() * PEN_CURSOR_SCALE),
            ToolKind::Stamp => (tools.stamp_glyph(), tools.thickness() * STAMP_SCALE),
        };
        let size = surface.measure_glyph(glyph, font_px);
        let origin = centered_origin(self.position, size);
        surface.draw_glyph(glyph, origin, font_px, tools.color());
    }
}
