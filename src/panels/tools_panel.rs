use egui::{Color32, Slider};

use crate::app::SketchApp;
use crate::components::ToolButton;
use crate::export::ExportBackground;
use crate::tools::ToolKind;

const PEN_ICON: &str = "✏";

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            mode_section(app, ui);
            ui.separator();

            history_section(app, ui);
            ui.separator();

            color_section(app, ui);
            ui.separator();

            thickness_section(app, ui);
            ui.separator();

            stamp_section(app, ui);
            ui.separator();

            export_section(app, ui);

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn mode_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    let kind = app.sketch().tools().kind();
    let stamp_icon = app.sketch().tools().stamp_glyph().to_owned();

    ui.horizontal(|ui| {
        let pen = ToolButton::new(PEN_ICON, kind == ToolKind::Stroke).with_tooltip("Pen");
        if pen.show(ui).clicked() {
            app.sketch_mut().switch_mode(ToolKind::Stroke);
        }
        let stamp = ToolButton::new(&stamp_icon, kind == ToolKind::Stamp).with_tooltip("Stamp");
        if stamp.show(ui).clicked() {
            app.sketch_mut().switch_mode(ToolKind::Stamp);
        }
    });
}

fn history_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_undo = app.sketch().history().can_undo();
        let can_redo = app.sketch().history().can_redo();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.sketch_mut().undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.sketch_mut().redo();
        }
        if ui.button("Clear").clicked() {
            app.sketch_mut().clear();
        }
    });

    let history = app.sketch().history();
    egui::CollapsingHeader::new(format!(
        "History ({} / {})",
        history.committed().len(),
        history.undone().len()
    ))
    .id_salt("history_grid")
    .show(ui, |ui| {
        egui::Grid::new("action_history_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Undo Stack");
                ui.strong("Redo Stack");
                ui.end_row();

                let committed = history.committed();
                let undone = history.undone();
                for i in 0..committed.len().max(undone.len()) {
                    ui.label(committed.get(i).map_or("", |action| action.label()));
                    ui.label(undone.get(i).map_or("", |action| action.label()));
                    ui.end_row();
                }
            });
    });
}

fn color_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    let mut color = app.sketch().tools().color();
    let swatches = app.sketch().tools().swatches().to_vec();

    ui.horizontal(|ui| {
        ui.label("Color");
        if ui.color_edit_button_srgba(&mut color).changed() {
            app.sketch_mut().set_color32(color);
        }
        if ui.button("New Color").clicked() && !app.sketch_mut().add_color_swatch(color) {
            app.set_status(format!("{} is already a swatch", color.to_hex()));
        }
    });

    ui.horizontal_wrapped(|ui| {
        for swatch in swatches {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::click());
            let outline = if swatch == color { Color32::WHITE } else { Color32::DARK_GRAY };
            ui.painter().rect_filled(rect, 2.0, swatch);
            ui.painter().rect_stroke(rect, 2.0, egui::Stroke::new(1.0, outline));
            if response.on_hover_text(swatch.to_hex()).clicked() {
                app.sketch_mut().set_color32(swatch);
            }
        }
    });
}

fn thickness_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    let mut thickness = app.sketch().tools().thickness();
    let range = app.sketch().tools().thickness_range();

    let response = ui.add(Slider::new(&mut thickness, range).step_by(1.0).text("Thickness"));
    if response.changed() {
        if let Err(err) = app.sketch_mut().set_thickness(thickness) {
            log::error!("Rejected thickness: {}", err);
        }
    }
}

fn stamp_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    let stamps = app.sketch().tools().stamps().to_vec();
    let selected = (app.sketch().tools().kind() == ToolKind::Stamp)
        .then(|| app.sketch().tools().stamp_glyph().to_owned());

    ui.label("Stamps");
    ui.horizontal_wrapped(|ui| {
        for glyph in &stamps {
            let button = ToolButton::new(glyph, selected.as_deref() == Some(glyph.as_str()));
            if button.show(ui).clicked() {
                if let Err(err) = app.sketch_mut().select_stamp(glyph) {
                    log::error!("Could not select stamp: {}", err);
                }
            }
        }
    });

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(app.new_stamp_mut()).desired_width(60.0));
        if ui.button("New Stamp").clicked() {
            let glyph = app.new_stamp_mut().trim().to_owned();
            if app.sketch_mut().add_stamp(&glyph) {
                app.new_stamp_mut().clear();
            } else {
                app.set_status(format!("Cannot add stamp '{}': empty or already present", glyph));
            }
        }
    });
}

fn export_section(app: &mut SketchApp, ui: &mut egui::Ui) {
    ui.label(format!("Export {}", app.sketch().config().export_file_name()));
    ui.horizontal(|ui| {
        for background in [ExportBackground::Transparent, ExportBackground::ToolColor] {
            if ui.button(background.label()).clicked() {
                app.export(background);
            }
        }
    });
}
