use crate::action::Action;
use crate::geometry::{Point, Segment};

/// The ordered log of drawable actions plus the undo/redo discipline.
///
/// `committed` is painted oldest first. `undone` holds actions removed by undo, the
/// most recent on top, and is only ever fed by `undo` and drained by `redo` or
/// invalidated by new ink.
///
/// `current` is the action being built. While a gesture is in flight it is painted
/// right after `committed`, which looks exactly like it already sat on top of the
/// list, but it only joins `committed` when the gesture is finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionHistory {
    committed: Vec<Action>,
    undone: Vec<Action>,
    current: Action,
    in_flight: bool,
}

impl ActionHistory {
    pub fn new(current: Action) -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            current,
            in_flight: false,
        }
    }

    pub fn committed(&self) -> &[Action] {
        &self.committed
    }

    pub fn undone(&self) -> &[Action] {
        &self.undone
    }

    pub fn current(&self) -> &Action {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Action {
        &mut self.current
    }

    /// True between `begin_action` and `finalize_current`.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Everything that should be on the surface, in paint order.
    pub fn visible(&self) -> impl Iterator<Item = &Action> {
        self.committed
            .iter()
            .chain(self.in_flight.then_some(&self.current))
    }

    /// Start a gesture with the current action.
    pub fn begin_action(&mut self) {
        if self.in_flight {
            log::debug!("begin_action while a gesture is already in flight");
        }
        self.in_flight = true;
    }

    /// Append a segment to the current stroke. New ink invalidates redo history.
    /// Returns false if the current action is not a stroke.
    pub fn append_to_current(&mut self, segment: Segment) -> bool {
        let Action::Stroke(stroke) = &mut self.current else {
            return false;
        };
        stroke.append(segment);
        self.invalidate_redo();
        true
    }

    /// Move the current stamp's anchor. Returns false if the current action is not
    /// a stamp.
    pub fn reposition_current(&mut self, anchor: Point) -> bool {
        let Action::Stamp(stamp) = &mut self.current else {
            return false;
        };
        stamp.reposition(anchor);
        true
    }

    /// End the gesture. An empty stroke is discarded; anything else is committed and
    /// replaced by a fresh action of the same kind and settings.
    ///
    /// Returns true if something was committed.
    pub fn finalize_current(&mut self) -> bool {
        if !self.in_flight {
            return false;
        }
        self.in_flight = false;

        if self.current.is_empty() {
            log::debug!("Discarding empty {}", self.current.label());
            return false;
        }

        let fresh = self.current.fresh_like();
        let finished = std::mem::replace(&mut self.current, fresh);
        log::debug!(
            "Committed {} (history length {})",
            finished.label(),
            self.committed.len() + 1
        );
        self.committed.push(finished);
        // A placed stamp is new geometry just like appended stroke segments.
        self.invalidate_redo();
        true
    }

    /// Move the most recent committed action onto the undone stack.
    /// Returns false (and does nothing) if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(action) => {
                log::debug!("Undo {}", action.label());
                self.undone.push(action);
                true
            }
            None => {
                log::debug!("Undo requested with empty history");
                false
            }
        }
    }

    /// Move the most recently undone action back onto the committed stack.
    /// Returns false (and does nothing) if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(action) => {
                log::debug!("Redo {}", action.label());
                self.committed.push(action);
                true
            }
            None => {
                log::debug!("Redo requested with empty undone stack");
                false
            }
        }
    }

    /// Drop both stacks and any in-flight gesture, and start over with `current`.
    pub fn clear(&mut self, current: Action) {
        self.committed.clear();
        self.undone.clear();
        self.current = current;
        self.in_flight = false;
    }

    /// Swap in a different current action, discarding the old one. Only allowed
    /// between gestures; returns false while one is in flight.
    pub fn replace_current(&mut self, current: Action) -> bool {
        if self.in_flight {
            return false;
        }
        self.current = current;
        true
    }

    fn invalidate_redo(&mut self) {
        if !self.undone.is_empty() {
            log::debug!("Dropping {} undone action(s)", self.undone.len());
            self.undone.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use crate::stroke::Stroke;
    use egui::{Color32, pos2};

    fn new_history() -> ActionHistory {
        ActionHistory::new(Action::Stroke(Stroke::new(Color32::BLACK, 1.0)))
    }

    fn draw_line(history: &mut ActionHistory, from: Point, to: Point) {
        history.begin_action();
        assert!(history.append_to_current(Segment::new(from, to)));
        assert!(history.finalize_current());
    }

    #[test]
    fn test_in_flight_action_is_not_committed() {
        let mut history = new_history();
        history.begin_action();
        history.append_to_current(Segment::new(pos2(0.0, 0.0), pos2(1.0, 1.0)));

        assert!(history.committed().is_empty());
        assert_eq!(history.visible().count(), 1);

        history.finalize_current();
        assert_eq!(history.committed().len(), 1);
        assert_eq!(history.visible().count(), 1);
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_empty_stroke_is_discarded() {
        let mut history = new_history();
        history.begin_action();
        assert!(!history.finalize_current());
        assert!(history.committed().is_empty());
        assert!(!history.is_in_flight());
    }

    #[test]
    fn test_finalize_without_begin_is_noop() {
        let mut history = new_history();
        history.append_to_current(Segment::new(pos2(0.0, 0.0), pos2(1.0, 1.0)));
        assert!(!history.finalize_current());
        assert!(history.committed().is_empty());
    }

    #[test]
    fn test_undo_redo_on_empty_stacks() {
        let mut history = new_history();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.committed().is_empty());
        assert!(history.undone().is_empty());
    }

    #[test]
    fn test_undo_then_redo_restores_order() {
        let mut history = new_history();
        draw_line(&mut history, pos2(0.0, 0.0), pos2(1.0, 0.0));
        draw_line(&mut history, pos2(0.0, 1.0), pos2(1.0, 1.0));
        draw_line(&mut history, pos2(0.0, 2.0), pos2(1.0, 2.0));
        let before = history.clone();

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.committed().len(), 1);
        assert_eq!(history.undone().len(), 2);

        assert!(history.redo());
        assert!(history.redo());
        assert_eq!(history, before);
    }

    #[test]
    fn test_new_ink_invalidates_redo() {
        let mut history = new_history();
        draw_line(&mut history, pos2(0.0, 0.0), pos2(1.0, 0.0));
        history.undo();
        assert!(history.can_redo());

        history.begin_action();
        history.append_to_current(Segment::new(pos2(5.0, 5.0), pos2(6.0, 6.0)));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_gesture_keeps_redo() {
        let mut history = new_history();
        draw_line(&mut history, pos2(0.0, 0.0), pos2(1.0, 0.0));
        history.undo();

        history.begin_action();
        history.finalize_current();
        assert!(history.can_redo());
    }

    #[test]
    fn test_stamp_commit_invalidates_redo() {
        let mut history = new_history();
        draw_line(&mut history, pos2(0.0, 0.0), pos2(1.0, 0.0));
        history.undo();

        assert!(history.replace_current(Action::Stamp(Stamp::new("🚀", 2.0, Color32::BLACK))));
        history.begin_action();
        assert!(history.reposition_current(pos2(5.0, 5.0)));
        assert!(!history.append_to_current(Segment::new(pos2(0.0, 0.0), pos2(1.0, 1.0))));
        assert!(history.finalize_current());

        assert!(history.undone().is_empty());
        assert_eq!(history.committed().len(), 1);
        assert_eq!(history.current().as_stamp().map(Stamp::glyph), Some("🚀"));
    }

    #[test]
    fn test_replace_current_refused_mid_gesture() {
        let mut history = new_history();
        history.begin_action();
        assert!(!history.replace_current(Action::Stamp(Stamp::new("🎲", 1.0, Color32::BLACK))));
        assert!(history.current().as_stroke().is_some());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut history = new_history();
        draw_line(&mut history, pos2(0.0, 0.0), pos2(1.0, 0.0));
        draw_line(&mut history, pos2(0.0, 1.0), pos2(1.0, 1.0));
        history.undo();
        history.begin_action();

        history.clear(Action::Stroke(Stroke::new(Color32::RED, 2.0)));
        assert!(history.committed().is_empty());
        assert!(history.undone().is_empty());
        assert!(!history.is_in_flight());
        assert_eq!(history.current(), &Action::Stroke(Stroke::new(Color32::RED, 2.0)));
    }
}
