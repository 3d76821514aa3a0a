mod history;

pub use history::ActionHistory;

use crate::error::SketchResult;
use crate::state::SketchContext;
use crate::tools::ToolKind;

/// Commands the UI shell sends into the sketch (buttons, sliders, shortcuts).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear,
    Undo,
    Redo,
    /// Hex color token, e.g. `#ff0000`
    SetColor(String),
    SetThickness(f32),
    SetStampGlyph(String),
    /// Set the glyph and enter stamp mode
    SelectStamp(String),
    SwitchMode(ToolKind),
}

impl Command {
    /// Execute the command against the sketch.
    ///
    /// Only setting commands can fail, and only on invalid values.
    pub fn execute(&self, sketch: &mut SketchContext) -> SketchResult<()> {
        log::debug!("Executing {:?}", self);
        match self {
            Command::Clear => sketch.clear(),
            Command::Undo => {
                sketch.undo();
            }
            Command::Redo => {
                sketch.redo();
            }
            Command::SetColor(value) => sketch.set_color(value)?,
            Command::SetThickness(value) => sketch.set_thickness(*value)?,
            Command::SetStampGlyph(glyph) => sketch.set_stamp_glyph(glyph)?,
            Command::SelectStamp(glyph) => sketch.select_stamp(glyph)?,
            Command::SwitchMode(kind) => {
                sketch.switch_mode(*kind);
            }
        }
        Ok(())
    }
}
