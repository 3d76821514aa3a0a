use egui::{Context, PointerButton, Pos2, Rect};

use crate::geometry::Point;

mod router;
pub use router::route_event;

/// Pointer events in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the surface
    PointerDown { position: Point },
    /// Pointer moved over the surface (button held or not)
    PointerMove { position: Point },
    /// Primary button released
    PointerUp { position: Point },
    /// Pointer entered the surface
    PointerEnter { position: Point },
    /// Pointer left the surface; carries the last position seen inside it
    PointerLeave { position: Point },
}

/// Turns raw egui pointer state for the canvas rect into [`InputEvent`]s.
///
/// egui only reports the pointer's current state each frame, so enter/leave and
/// movement are derived by comparing against the previous frame.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    inside: bool,
    last_position: Option<Point>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            inside: false,
            last_position: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Read this frame's pointer state from egui.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let (hover, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
            )
        });
        self.translate(hover, pressed, released)
    }

    /// Derive events from one frame of pointer state given in screen coordinates.
    ///
    /// Events come out in the order enter, move, down, up, leave.
    pub fn translate(
        &mut self,
        hover: Option<Pos2>,
        pressed: bool,
        released: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = hover.map(|pos| pos - self.canvas_rect.min.to_vec2());
        let inside_now = hover.is_some_and(|pos| self.canvas_rect.contains(pos));

        if inside_now {
            if let Some(position) = local {
                if !self.inside {
                    events.push(InputEvent::PointerEnter { position });
                }
                if self.last_position != Some(position) {
                    events.push(InputEvent::PointerMove { position });
                }
                if pressed {
                    events.push(InputEvent::PointerDown { position });
                }
                if released {
                    events.push(InputEvent::PointerUp { position });
                }
                self.last_position = Some(position);
            }
        } else if self.inside {
            let position = self.last_position.unwrap_or_default();
            if released {
                events.push(InputEvent::PointerUp { position });
            }
            events.push(InputEvent::PointerLeave { position });
            self.last_position = None;
        }

        self.inside = inside_now;
        events
    }
}
