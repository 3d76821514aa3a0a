use crate::state::SketchContext;

use super::InputEvent;

/// Dispatch one pointer event into the sketch.
pub fn route_event(event: &InputEvent, sketch: &mut SketchContext) {
    match *event {
        InputEvent::PointerDown { position } => sketch.pointer_down(position),
        InputEvent::PointerMove { position } => sketch.pointer_move(position),
        InputEvent::PointerUp { position } => sketch.pointer_up(position),
        InputEvent::PointerEnter { position } => sketch.pointer_enter(position),
        InputEvent::PointerLeave { position } => sketch.pointer_leave(position),
    }
}
