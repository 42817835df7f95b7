use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::SketchApp;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let mut tool = app.tools().tool();
            egui::ComboBox::from_label("Tool")
                .selected_text(tool.name())
                .show_ui(ui, |ui| {
                    for kind in ToolKind::ALL {
                        ui.selectable_value(&mut tool, kind, kind.name());
                    }
                });
            app.tools_mut().set_tool(tool);
            if tool == ToolKind::Text {
                ui.weak("Text drawing is not available yet.");
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Stroke:");
                let mut color = app.tools().stroke_color();
                if color_edit_button_srgba(ui, &mut color, Alpha::OnlyBlend).changed() {
                    app.tools_mut().set_stroke_color(color);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Fill:");
                let mut color = app.tools().fill_color();
                if color_edit_button_srgba(ui, &mut color, Alpha::OnlyBlend).changed() {
                    app.tools_mut().set_fill_color(color);
                }
            });

            // Any value is accepted; invalid widths just draw no stroke
            ui.horizontal(|ui| {
                ui.label("Line width:");
                let mut width = app.tools().line_width();
                if ui.add(egui::DragValue::new(&mut width).speed(0.1)).changed() {
                    app.tools_mut().set_line_width(width);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Font size:");
                let mut size = app.tools().font_size();
                if ui.add(egui::DragValue::new(&mut size).speed(0.5)).changed() {
                    app.tools_mut().set_font_size(size);
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let history = app.document().history();
                let (can_undo, can_redo) = (history.can_undo(), history.can_redo());

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
                if ui.button("Clear").clicked() {
                    app.clear();
                }
                if ui.button("Save").clicked() {
                    app.save_png();
                }
            });
            ui.separator();

            let document = app.document();
            ui.label(format!("Undo stack size: {}", document.history().undo_stack().len()));
            ui.label(format!("Redo stack size: {}", document.history().redo_stack().len()));
            ui.label(format!("State: {}", document.gesture().state().name()));
        });
}
