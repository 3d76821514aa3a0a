use egui::Color32;

use crate::geometry::Segment;
use crate::surface::Surface;

/// A freehand path made of connected straight segments.
///
/// Color and thickness belong to the whole stroke, not to individual segments, so a
/// stroke always paints uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    segments: Vec<Segment>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    /// Create an empty stroke with the given settings
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            segments: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn with_segments(color: Color32, thickness: f32, segments: Vec<Segment>) -> Self {
        Self {
            segments,
            color,
            thickness,
        }
    }

    /// Append a segment in drawing order. Any two points are accepted.
    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for segment in &self.segments {
            surface.draw_segment(segment, self.color, self.thickness);
        }
    }
}
