use egui::{CursorIcon, Sense, vec2};

use crate::app::SketchApp;
use crate::input::route_event;
use crate::surface::EguiSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let config = app.sketch().config();
        let canvas_size = vec2(config.canvas_width as f32, config.canvas_height as f32);
        let (response, painter) = ui.allocate_painter(canvas_size, Sense::drag());
        let canvas_rect = response.rect;

        app.input_mut().set_canvas_rect(canvas_rect);
        let events = app.input_mut().process_input(ctx);
        for event in &events {
            route_event(event, app.sketch_mut());
        }

        // The preview glyph stands in for the system cursor.
        if response.hovered() && app.sketch().preview().is_active() {
            ctx.set_cursor_icon(CursorIcon::None);
        }

        let mut surface = EguiSurface::new(&painter, canvas_rect, app.background());
        app.sketch().redraw(Some(&mut surface));
    });
}
