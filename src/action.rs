use egui::Color32;

use crate::stamp::Stamp;
use crate::stroke::Stroke;
use crate::surface::Surface;
use crate::tools::ToolKind;

/// Contract shared by everything that can live in the action history.
pub trait Drawable {
    /// Paint onto `surface`. Repeated calls paint the same thing.
    fn render(&self, surface: &mut dyn Surface);

    /// Color the action paints with; the preview is tinted to match.
    fn color(&self) -> Color32;
}

/// One undoable unit of drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Stroke(Stroke),
    Stamp(Stamp),
}

impl Action {
    pub fn kind(&self) -> ToolKind {
        match self {
            Action::Stroke(_) => ToolKind::Stroke,
            Action::Stamp(_) => ToolKind::Stamp,
        }
    }

    /// An action of the same kind and settings, without any geometry.
    pub fn fresh_like(&self) -> Action {
        match self {
            Action::Stroke(stroke) => {
                Action::Stroke(Stroke::new(stroke.color(), stroke.thickness()))
            }
            Action::Stamp(stamp) => {
                Action::Stamp(Stamp::new(stamp.glyph(), stamp.size(), stamp.color()))
            }
        }
    }

    /// True for a stroke with no segments. Stamps are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Action::Stroke(stroke) => stroke.is_empty(),
            Action::Stamp(_) => false,
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        match self {
            Action::Stroke(stroke) => stroke.set_color(color),
            Action::Stamp(stamp) => stamp.set_color(color),
        }
    }

    /// Push tool settings into the action. Strokes take color and thickness; stamps
    /// take color, glyph and use the thickness as their size.
    pub fn apply_settings(&mut self, color: Color32, thickness: f32, glyph: &str) {
        match self {
            Action::Stroke(stroke) => {
                stroke.set_color(color);
                stroke.set_thickness(thickness);
            }
            Action::Stamp(stamp) => {
                stamp.set_color(color);
                stamp.set_size(thickness);
                stamp.set_glyph(glyph);
            }
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Action::Stroke(stroke) => Some(stroke),
            Action::Stamp(_) => None,
        }
    }

    pub fn as_stamp(&self) -> Option<&Stamp> {
        match self {
            Action::Stamp(stamp) => Some(stamp),
            Action::Stroke(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Stroke(_) => "Stroke",
            Action::Stamp(_) => "Stamp",
        }
    }
}

impl Drawable for Action {
    fn render(&self, surface: &mut dyn Surface) {
        match self {
            Action::Stroke(stroke) => stroke.render(surface),
            Action::Stamp(stamp) => stamp.render(surface),
        }
    }

    fn color(&self) -> Color32 {
        match self {
            Action::Stroke(stroke) => stroke.color(),
            Action::Stamp(stamp) => stamp.color(),
        }
    }
}

impl From<Stroke> for Action {
    fn from(stroke: Stroke) -> Self {
        Action::Stroke(stroke)
    }
}

impl From<Stamp> for Action {
    fn from(stamp: Stamp) -> Self {
        Action::Stamp(stamp)
    }
}
