use crate::action::Drawable;
use crate::command::ActionHistory;
use crate::preview::PreviewOverlay;
use crate::surface::Surface;
use crate::tools::ToolState;

/// Reconciles the action history and the preview into pixels.
///
/// Stateless: every redraw washes the surface and replays everything, so calling it
/// on every pointer move is safe and two calls with no mutation in between paint
/// the same thing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Wash, paint history in order (later actions overdraw earlier ones), then the
    /// preview on top.
    ///
    /// With no surface this is a no-op; state is untouched so a later redraw on a
    /// real surface shows everything.
    pub fn redraw(
        &self,
        surface: Option<&mut dyn Surface>,
        history: &ActionHistory,
        preview: &PreviewOverlay,
        tools: &ToolState,
    ) {
        let Some(surface) = surface else {
            log::trace!("Redraw skipped: no surface available");
            return;
        };

        self.render_history(surface, history);
        preview.render(surface, tools);
    }

    /// Wash and paint the history without the preview.
    pub fn render_history(&self, surface: &mut dyn Surface, history: &ActionHistory) {
        surface.clear();
        for action in history.visible() {
            action.render(surface);
        }
    }

    /// Wash and paint committed actions only, leaving out a gesture in flight.
    pub fn render_committed(&self, surface: &mut dyn Surface, history: &ActionHistory) {
        surface.clear();
        for action in history.committed() {
            action.render(surface);
        }
    }
}
