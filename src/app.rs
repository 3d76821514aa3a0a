use egui::{Color32, Key, KeyboardShortcut, Modifiers};

use crate::command::Command;
use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::event::SketchEvent;
use crate::export::{ExportBackground, export_png};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::state::SketchContext;
use crate::surface::EguiMetrics;
use crate::tools::parse_color;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

pub struct SketchApp {
    sketch: SketchContext,
    input: InputHandler,
    background: Color32,
    new_stamp: String,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> SketchResult<Self> {
        let background = parse_color(&config.background_color)?;
        let sketch = SketchContext::new(config)?
            .with_metrics(Box::new(EguiMetrics::new(cc.egui_ctx.clone())));

        // egui only repaints on input by default; mutations outside a frame need a nudge.
        let ctx = cc.egui_ctx.clone();
        sketch.subscribe(Box::new(move |event: &SketchEvent| {
            log::trace!("Repaint requested by {:?}", event);
            ctx.request_repaint();
        }));

        Ok(Self {
            sketch,
            input: InputHandler::new(egui::Rect::NOTHING),
            background,
            new_stamp: String::new(),
            status: None,
        })
    }

    pub fn sketch(&self) -> &SketchContext {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut SketchContext {
        &mut self.sketch
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Canvas wash color on screen
    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn new_stamp_mut(&mut self) -> &mut String {
        &mut self.new_stamp
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn export(&mut self, background: ExportBackground) {
        match export_png(&self.sketch, background) {
            Ok(path) => self.set_status(format!("Exported {}", path.display())),
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.set_status(err.to_string());
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Check redo first: the undo shortcut also matches with shift held.
        let (redo, undo) = ctx.input_mut(|input| {
            let redo = input.consume_shortcut(&REDO) || input.consume_shortcut(&REDO_ALT);
            let undo = !redo && input.consume_shortcut(&UNDO);
            (redo, undo)
        });

        let command = if redo {
            Command::Redo
        } else if undo {
            Command::Undo
        } else {
            return;
        };
        if let Err(err) = command.execute(&mut self.sketch) {
            log::error!("Shortcut failed: {}", err);
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
