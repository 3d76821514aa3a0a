use egui::Color32;

use crate::action::Action;
use crate::command::ActionHistory;
use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::event::{EventBus, EventHandler, SketchEvent};
use crate::geometry::{Point, Segment, centered_origin};
use crate::preview::PreviewOverlay;
use crate::renderer::Renderer;
use crate::surface::{GlyphMetrics, MonospaceMetrics, Surface};
use crate::tools::{ToolKind, ToolState, parse_color};

/// The owned state of one sketchpad session.
///
/// `SketchContext` holds the action history, the tool state, the preview overlay and
/// the observer list, and is the only place that mutates them. Pointer handlers and
/// widget commands call straight into it; every handler mutates first and then emits
/// one [`SketchEvent`] so observers can request a redraw.
///
/// # Example
///
/// ```rust
/// use sketchpad::{SketchConfig, SketchContext, RecordingSurface};
/// use egui::pos2;
///
/// let mut sketch = SketchContext::new(SketchConfig::default()).unwrap();
/// sketch.set_color("#ff0000").unwrap();
/// sketch.pointer_down(pos2(0.0, 0.0));
/// sketch.pointer_move(pos2(10.0, 0.0));
/// sketch.pointer_up(pos2(10.0, 0.0));
/// assert_eq!(sketch.history().committed().len(), 1);
///
/// let mut surface = RecordingSurface::new();
/// sketch.redraw(Some(&mut surface));
/// assert_eq!(surface.segment_count(), 1);
/// ```
pub struct SketchContext {
    config: SketchConfig,
    history: ActionHistory,
    tools: ToolState,
    preview: PreviewOverlay,
    renderer: Renderer,
    events: EventBus,
    metrics: Box<dyn GlyphMetrics>,
}

impl std::fmt::Debug for SketchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchContext")
            .field("history", &self.history)
            .field("tools", &self.tools)
            .field("preview", &self.preview)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl SketchContext {
    /// Creates a context in pen mode with an empty history.
    ///
    /// Stamps are centered with [`MonospaceMetrics`] until real metrics are
    /// installed with [`SketchContext::set_metrics`].
    pub fn new(config: SketchConfig) -> SketchResult<Self> {
        config.validate()?;
        let tools = ToolState::from_config(&config)?;
        let history = ActionHistory::new(tools.new_action());
        Ok(Self {
            config,
            history,
            tools,
            preview: PreviewOverlay::default(),
            renderer: Renderer::new(),
            events: EventBus::new(),
            metrics: Box::new(MonospaceMetrics),
        })
    }

    pub fn with_metrics(mut self, metrics: Box<dyn GlyphMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn set_metrics(&mut self, metrics: Box<dyn GlyphMetrics>) {
        self.metrics = metrics;
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn preview(&self) -> &PreviewOverlay {
        &self.preview
    }

    /// Register an observer for redraw requests.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    // --- Pointer input -----------------------------------------------------------

    /// Start a gesture with the current action at `position`.
    pub fn pointer_down(&mut self, position: Point) {
        if self.tools.is_pointer_down() {
            log::debug!("Ignoring pointer down: pointer already down");
            return;
        }

        self.tools.update_position(position);
        self.tools.set_pointer_down(true);
        self.history.current_mut().set_color(self.tools.color());
        if self.tools.kind() == ToolKind::Stamp {
            let anchor = self.stamp_anchor(position);
            self.history.reposition_current(anchor);
        }
        self.history.begin_action();
        self.events.emit(SketchEvent::DrawingChanged);
    }

    /// Extend the current stroke or drag the current stamp while the pointer is
    /// down. The preview follows the pointer either way.
    pub fn pointer_move(&mut self, position: Point) {
        let drawing = self.tools.is_pointer_down();
        if drawing {
            match self.tools.kind() {
                ToolKind::Stroke => {
                    let segment = Segment::new(self.tools.last_position(), position);
                    self.history.append_to_current(segment);
                }
                ToolKind::Stamp => {
                    let anchor = self.stamp_anchor(position);
                    self.history.reposition_current(anchor);
                }
            }
        }

        self.tools.update_position(position);
        self.preview.move_to(position);
        log::trace!("Pointer move to {:?} (drawing: {})", position, drawing);

        if drawing {
            self.events.emit(SketchEvent::DrawingChanged);
        } else {
            self.emit_tool_changed();
        }
    }

    /// Finish the gesture. A stamp lands centered on the release position.
    pub fn pointer_up(&mut self, position: Point) {
        if !self.tools.is_pointer_down() {
            return;
        }

        if self.tools.kind() == ToolKind::Stamp {
            let anchor = self.stamp_anchor(position);
            self.history.reposition_current(anchor);
        }
        self.tools.update_position(position);
        self.tools.set_pointer_down(false);
        self.history.finalize_current();
        self.events.emit(SketchEvent::DrawingChanged);
    }

    pub fn pointer_enter(&mut self, position: Point) {
        self.preview.activate(position);
        self.tools.update_position(position);
        self.emit_tool_changed();
    }

    /// Leaving the surface hides the preview and finalizes any gesture, exactly like
    /// releasing the button.
    pub fn pointer_leave(&mut self, position: Point) {
        self.preview.deactivate();
        if self.tools.is_pointer_down() {
            self.pointer_up(position);
        } else {
            self.emit_tool_changed();
        }
    }

    // --- Commands ------------------------------------------------------------------

    /// Wipe both stacks and start over with a fresh action of the active kind.
    /// Cancels a gesture in flight.
    pub fn clear(&mut self) {
        self.history.clear(self.tools.new_action());
        self.tools.set_pointer_down(false);
        log::info!("Sketch cleared");
        self.events.emit(SketchEvent::Cleared);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        self.events.emit(SketchEvent::DrawingChanged);
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        self.events.emit(SketchEvent::DrawingChanged);
        redone
    }

    /// Set the tool color from a hex token such as `#ff0000`.
    pub fn set_color(&mut self, value: &str) -> SketchResult<()> {
        let color = parse_color(value)?;
        self.set_color32(color);
        Ok(())
    }

    pub fn set_color32(&mut self, color: Color32) {
        self.tools.set_color(color);
        self.propagate_settings();
    }

    pub fn set_thickness(&mut self, thickness: f32) -> SketchResult<()> {
        self.tools.set_thickness(thickness)?;
        self.propagate_settings();
        Ok(())
    }

    pub fn set_stamp_glyph(&mut self, glyph: &str) -> SketchResult<()> {
        self.tools.set_stamp_glyph(glyph)?;
        self.propagate_settings();
        Ok(())
    }

    /// Switch between pen and stamp mode.
    ///
    /// Ignored while the pointer is down or when `kind` is already active. Otherwise
    /// the current action is replaced by a fresh one of the new kind; nothing is
    /// committed until the next pointer down.
    pub fn switch_mode(&mut self, kind: ToolKind) -> bool {
        if self.tools.is_pointer_down() {
            log::debug!("Ignoring switch to {} mode while drawing", kind.name());
            return false;
        }
        if self.tools.kind() == kind {
            return false;
        }

        self.tools.set_kind(kind);
        self.history.replace_current(self.tools.new_action());
        log::info!("Switched to {} mode", kind.name());
        self.emit_tool_changed();
        true
    }

    /// Pick a stamp glyph and enter stamp mode (what a stamp button does).
    pub fn select_stamp(&mut self, glyph: &str) -> SketchResult<()> {
        self.set_stamp_glyph(glyph)?;
        self.switch_mode(ToolKind::Stamp);
        Ok(())
    }

    /// Add a glyph to the stamp palette.
    pub fn add_stamp(&mut self, glyph: &str) -> bool {
        let added = self.tools.add_stamp(glyph);
        if added {
            self.emit_tool_changed();
        }
        added
    }

    pub fn add_color_swatch(&mut self, color: Color32) -> bool {
        self.tools.add_color_swatch(color)
    }

    // --- Rendering -----------------------------------------------------------------

    /// Wash `surface` and replay history plus the preview onto it.
    pub fn redraw(&self, surface: Option<&mut dyn Surface>) {
        self.renderer
            .redraw(surface, &self.history, &self.preview, &self.tools);
    }

    /// Wash `surface` and replay history without the preview.
    pub fn render_history(&self, surface: &mut dyn Surface) {
        self.renderer.render_history(surface, &self.history);
    }

    /// Wash `surface` and paint committed actions only, as an export sees them.
    pub fn render_committed(&self, surface: &mut dyn Surface) {
        self.renderer.render_committed(surface, &self.history);
    }

    pub fn current_action(&self) -> &Action {
        self.history.current()
    }

    // Settings always rewrite the whole current action; committed actions are never
    // touched.
    fn propagate_settings(&mut self) {
        let color = self.tools.color();
        let thickness = self.tools.thickness();
        self.history
            .current_mut()
            .apply_settings(color, thickness, self.tools.stamp_glyph());

        // A stamp being dragged stays centered under the pointer when it changes size
        // or glyph.
        if self.history.is_in_flight() && self.tools.kind() == ToolKind::Stamp {
            let anchor = self.stamp_anchor(self.tools.last_position());
            self.history.reposition_current(anchor);
        }
        self.emit_tool_changed();
    }

    fn stamp_anchor(&self, position: Point) -> Point {
        match self.history.current() {
            Action::Stamp(stamp) => {
                let size = self.metrics.measure_glyph(stamp.glyph(), stamp.font_px());
                centered_origin(position, size)
            }
            Action::Stroke(_) => position,
        }
    }

    fn emit_tool_changed(&self) {
        self.events.emit(SketchEvent::ToolChanged {
            kind: self.tools.kind(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use egui::pos2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn new_sketch() -> SketchContext {
        SketchContext::new(SketchConfig::default()).unwrap()
    }

    #[test]
    fn test_move_without_pointer_down_only_moves_preview() {
        let mut sketch = new_sketch();
        sketch.pointer_enter(pos2(1.0, 1.0));
        sketch.pointer_move(pos2(5.0, 5.0));

        assert!(sketch.history().committed().is_empty());
        assert!(sketch.current_action().is_empty());
        assert_eq!(sketch.preview().position(), pos2(5.0, 5.0));
        assert_eq!(sketch.tools().last_position(), pos2(5.0, 5.0));
    }

    #[test]
    fn test_segments_chain_from_last_position() {
        let mut sketch = new_sketch();
        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(3.0, 0.0));
        sketch.pointer_move(pos2(3.0, 4.0));

        let stroke = sketch.current_action().as_stroke().cloned().unwrap();
        assert_eq!(
            stroke.segments(),
            &[
                Segment::new(pos2(0.0, 0.0), pos2(3.0, 0.0)),
                Segment::new(pos2(3.0, 0.0), pos2(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_pointer_down_picks_up_tool_color() {
        let mut sketch = new_sketch();
        sketch.tools.set_color(Color32::GREEN);
        sketch.pointer_down(pos2(0.0, 0.0));
        assert_eq!(sketch.current_action().as_stroke().unwrap().color(), Color32::GREEN);
    }

    #[test]
    fn test_live_setting_change_rewrites_in_flight_stroke() {
        let mut sketch = new_sketch();
        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(3.0, 0.0));
        sketch.set_color("#0000ff").unwrap();
        sketch.set_thickness(6.0).unwrap();
        sketch.pointer_move(pos2(6.0, 0.0));
        sketch.pointer_up(pos2(6.0, 0.0));

        let committed = sketch.history().committed()[0].as_stroke().cloned().unwrap();
        assert_eq!(committed.color(), Color32::from_rgb(0, 0, 255));
        assert_eq!(committed.thickness(), 6.0);

        // Later edits leave the committed stroke alone.
        sketch.set_color("#00ff00").unwrap();
        let committed = sketch.history().committed()[0].as_stroke().cloned().unwrap();
        assert_eq!(committed.color(), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_switch_mode_refused_while_drawing() {
        let mut sketch = new_sketch();
        sketch.pointer_down(pos2(0.0, 0.0));
        assert!(!sketch.switch_mode(ToolKind::Stamp));
        assert_eq!(sketch.tools().kind(), ToolKind::Stroke);

        sketch.pointer_up(pos2(0.0, 0.0));
        assert!(sketch.switch_mode(ToolKind::Stamp));
        assert!(!sketch.switch_mode(ToolKind::Stamp));
    }

    #[test]
    fn test_stamp_drag_and_release_centers_on_pointer() {
        let mut sketch = new_sketch();
        sketch.select_stamp("🚀").unwrap();
        sketch.set_thickness(2.0).unwrap();

        sketch.pointer_down(pos2(50.0, 50.0));
        assert_eq!(sketch.current_action().as_stamp().unwrap().anchor(), pos2(43.0, 43.0));

        sketch.pointer_move(pos2(60.0, 60.0));
        assert_eq!(sketch.current_action().as_stamp().unwrap().anchor(), pos2(53.0, 53.0));

        sketch.pointer_up(pos2(70.0, 70.0));
        assert_eq!(
            sketch.history().committed(),
            &[Action::Stamp(Stamp::at("🚀", 2.0, pos2(63.0, 63.0), Color32::BLACK))]
        );
    }

    #[test]
    fn test_invalid_settings_leave_state_untouched() {
        let mut sketch = new_sketch();
        let before = sketch.current_action().clone();
        assert!(sketch.set_color("nope").is_err());
        assert!(sketch.set_thickness(-1.0).is_err());
        assert!(sketch.set_stamp_glyph("").is_err());
        assert_eq!(sketch.current_action(), &before);
    }

    #[test]
    fn test_pointer_leave_finalizes() {
        let mut sketch = new_sketch();
        sketch.pointer_enter(pos2(0.0, 0.0));
        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(4.0, 4.0));
        sketch.pointer_leave(pos2(4.0, 4.0));

        assert_eq!(sketch.history().committed().len(), 1);
        assert!(!sketch.tools().is_pointer_down());
        assert!(!sketch.preview().is_active());
    }

    #[test]
    fn test_clear_cancels_gesture() {
        let mut sketch = new_sketch();
        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(4.0, 4.0));
        sketch.clear();

        assert!(!sketch.tools().is_pointer_down());
        assert!(!sketch.history().is_in_flight());
        sketch.pointer_up(pos2(4.0, 4.0));
        assert!(sketch.history().committed().is_empty());
    }

    #[test]
    fn test_every_mutation_emits_after_mutating() {
        let mut sketch = new_sketch();
        let events = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&events);
        sketch.subscribe(Box::new(move |event: &SketchEvent| {
            sink.borrow_mut().push(event.clone())
        }));

        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(1.0, 1.0));
        sketch.pointer_up(pos2(1.0, 1.0));
        sketch.undo();
        sketch.clear();

        assert_eq!(
            *events.borrow(),
            vec![
                SketchEvent::DrawingChanged,
                SketchEvent::DrawingChanged,
                SketchEvent::DrawingChanged,
                SketchEvent::DrawingChanged,
                SketchEvent::Cleared,
            ]
        );
    }
}
