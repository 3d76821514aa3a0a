use std::cell::RefCell;

use crate::event::{EventHandler, SketchEvent};

/// Synchronous observer list. Handlers run in subscription order, inside the call
/// that emitted.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handler_count", &self.handler_count())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Handlers cannot be removed; they live as long as the sketch.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Notify every handler. A handler must not emit on the same bus.
    pub fn emit(&self, event: SketchEvent) {
        let mut handlers = self.handlers.borrow_mut();
        log::trace!("Emitting {:?} to {} handler(s)", event, handlers.len());
        handlers
            .iter_mut()
            .for_each(|handler| handler.handle_event(&event));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}
