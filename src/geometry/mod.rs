use egui::{Pos2, Vec2};

/// A sample of the pointer position in surface-local coordinates.
/// (0, 0) is the top-left corner of the drawing surface.
pub type Point = Pos2;

/// One straight piece of a freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Zero-length segments are legal; they render as a dot or nothing.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Top-left origin that centers a glyph box of `glyph_size` on `position`.
///
/// Stamps and the preview cursor both go through here so a glyph sits
/// under the pointer instead of hanging off its corner.
pub fn centered_origin(position: Point, glyph_size: Vec2) -> Point {
    position - glyph_size / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_centered_origin() {
        let origin = centered_origin(pos2(50.0, 40.0), vec2(20.0, 10.0));
        assert_eq!(origin, pos2(40.0, 35.0));
    }

    #[test]
    fn test_degenerate_segment() {
        let dot = Segment::new(pos2(3.0, 3.0), pos2(3.0, 3.0));
        assert!(dot.is_degenerate());

        let line = Segment::new(pos2(0.0, 0.0), pos2(3.0, 4.0));
        assert!(!line.is_degenerate());
    }
}
