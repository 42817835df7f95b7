use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Canvas Drawing App");
        ui.label("Create and customize your drawings with ease.");
        ui.add_space(8.0);

        // The canvas is shown at its pixel size, so one point maps to one pixel
        let size = app.document().canvas().size();
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

        app.handle_input(ctx, rect, response.hovered());
        app.render_canvas(ctx, &ui.painter_at(rect), rect);
    });
}
