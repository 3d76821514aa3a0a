use crate::tools::ToolKind;

/// Notifications emitted after the sketch context has mutated.
///
/// Every variant means "the surface is stale, redraw it"; the payload only says why.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// The action history or the in-flight action changed
    DrawingChanged,
    /// A tool setting, the mode, or the preview cursor changed
    ToolChanged { kind: ToolKind },
    /// Everything was wiped
    Cleared,
}
