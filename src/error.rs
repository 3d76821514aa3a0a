use thiserror::Error;

/// Errors raised at the edges of the sketchpad: settings coming in from widgets,
/// configuration files, and export.
///
/// The action history itself never fails; empty undo/redo stacks and empty strokes
/// are ordinary no-ops.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Invalid color '{0}': expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("Invalid thickness {0}: must be a finite value greater than zero")]
    InvalidThickness(f32),

    #[error("Stamp glyph must not be empty")]
    EmptyGlyph,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type for fallible sketchpad operations
pub type SketchResult<T> = Result<T, SketchError>;
