use std::ops::RangeInclusive;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::SketchConfig;
use crate::error::{SketchError, SketchResult};
use crate::geometry::Point;
use crate::stamp::Stamp;
use crate::stroke::Stroke;

/// Which kind of action pointer gestures produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Freehand strokes ("Pen Mode")
    #[default]
    Stroke,
    /// Glyph stamps ("Stamp Mode")
    Stamp,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Stroke => "Pen",
            ToolKind::Stamp => "Stamp",
        }
    }
}

/// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color token.
pub fn parse_color(value: &str) -> SketchResult<Color32> {
    Color32::from_hex(value.trim()).map_err(|_| SketchError::InvalidColor(value.to_owned()))
}

/// Current tool settings and pointer state.
///
/// Widgets write here through the setters; the sketch context then pushes the new
/// values into the current action.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    color: Color32,
    thickness: f32,
    stamp_glyph: String,
    kind: ToolKind,
    pointer_down: bool,
    last_position: Point,
    thickness_range: RangeInclusive<f32>,
    stamps: Vec<String>,
    swatches: Vec<Color32>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(Color32::BLACK, 1.0, "🎲")
    }
}

impl ToolState {
    pub const DEFAULT_STAMPS: [&'static str; 3] = ["😂", "🚀", "🎲"];
    pub const DEFAULT_THICKNESS_RANGE: RangeInclusive<f32> = 1.0..=50.0;

    pub fn new(color: Color32, thickness: f32, stamp_glyph: impl Into<String>) -> Self {
        Self {
            color,
            thickness,
            stamp_glyph: stamp_glyph.into(),
            kind: ToolKind::Stroke,
            pointer_down: false,
            last_position: Point::ZERO,
            thickness_range: Self::DEFAULT_THICKNESS_RANGE,
            stamps: Self::DEFAULT_STAMPS.iter().map(|s| (*s).to_owned()).collect(),
            swatches: vec![color],
        }
    }

    pub fn from_config(config: &SketchConfig) -> SketchResult<Self> {
        let color = parse_color(&config.default_color)?;
        let mut state = Self::new(color, config.default_thickness, config.default_stamp.clone());
        state.thickness_range = config.min_thickness..=config.max_thickness;
        state.thickness = state.clamp_thickness(config.default_thickness)?;
        state.stamps.clear();
        for glyph in &config.stamps {
            state.add_stamp(glyph);
        }
        state.add_stamp(&config.default_stamp);
        Ok(state)
    }

    /// A fresh, empty action of the active kind carrying the current settings.
    pub fn new_action(&self) -> Action {
        self.new_action_of(self.kind)
    }

    pub fn new_action_of(&self, kind: ToolKind) -> Action {
        match kind {
            ToolKind::Stroke => Action::Stroke(Stroke::new(self.color, self.thickness)),
            ToolKind::Stamp => {
                Action::Stamp(Stamp::new(self.stamp_glyph.clone(), self.thickness, self.color))
            }
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn stamp_glyph(&self) -> &str {
        &self.stamp_glyph
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn last_position(&self) -> Point {
        self.last_position
    }

    pub fn thickness_range(&self) -> RangeInclusive<f32> {
        self.thickness_range.clone()
    }

    pub fn stamps(&self) -> &[String] {
        &self.stamps
    }

    pub fn swatches(&self) -> &[Color32] {
        &self.swatches
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// Validate and store a thickness, clamped into the slider range.
    /// Returns the value actually stored.
    pub fn set_thickness(&mut self, thickness: f32) -> SketchResult<f32> {
        self.thickness = self.clamp_thickness(thickness)?;
        Ok(self.thickness)
    }

    pub fn set_stamp_glyph(&mut self, glyph: &str) -> SketchResult<()> {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            return Err(SketchError::EmptyGlyph);
        }
        self.stamp_glyph = glyph.to_owned();
        Ok(())
    }

    pub(crate) fn set_kind(&mut self, kind: ToolKind) {
        self.kind = kind;
    }

    pub(crate) fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub(crate) fn update_position(&mut self, position: Point) {
        self.last_position = position;
    }

    /// Add a glyph to the stamp palette. Empty and duplicate glyphs are ignored.
    pub fn add_stamp(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() || self.stamps.iter().any(|s| s == glyph) {
            return false;
        }
        self.stamps.push(glyph.to_owned());
        true
    }

    /// Add a color swatch. Duplicates are ignored.
    pub fn add_color_swatch(&mut self, color: Color32) -> bool {
        if self.swatches.contains(&color) {
            return false;
        }
        self.swatches.push(color);
        true
    }

    fn clamp_thickness(&self, thickness: f32) -> SketchResult<f32> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(SketchError::InvalidThickness(thickness));
        }
        Ok(thickness.clamp(*self.thickness_range.start(), *self.thickness_range.end()))
    }
}
