use eframe::egui::{self, Color32, Pos2, RichText, Sense, Stroke};
use timespent_core::{parse_color, ColorKey, Row};

const DOT_SIZE: f32 = 20.0;
const ROW_TEXT_COLOR: Color32 = Color32::from_rgb(0x3c, 0x40, 0x43);

/// Dot fill for a legend row: page colors are `rgb(..)`, keyword colors are
/// CSS names.
pub fn dot_color(key: &ColorKey) -> Color32 {
    if let Some(rgb) = parse_color(Some(key.as_str())) {
        return Color32::from_rgb(rgb.r, rgb.g, rgb.b);
    }
    match key.as_str().trim().to_ascii_lowercase().as_str() {
        "blue" => Color32::from_rgb(0, 0, 255),
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        _ => Color32::from_rgb(128, 128, 128),
    }
}

/// The not-accepted sentinel is white and gets a black outline.
pub fn needs_outline(key: &ColorKey) -> bool {
    key.is_not_accepted_yet()
}

pub fn draw_section_header(ui: &mut egui::Ui, title: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).size(14.0).strong().color(ROW_TEXT_COLOR));
        ui.add_space(10.0);

        let line_width = ui.available_width().max(0.0);
        if line_width <= 0.0 {
            return;
        }

        let (line_rect, _) = ui.allocate_exact_size(egui::vec2(line_width, 16.0), Sense::hover());
        let y = line_rect.center().y + 1.0;
        ui.painter().line_segment(
            [Pos2::new(line_rect.left(), y), Pos2::new(line_rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgb(206, 206, 201)),
        );
    });
}

pub fn draw_rows(ui: &mut egui::Ui, rows: &[Row]) {
    for row in rows {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(DOT_SIZE, DOT_SIZE), Sense::hover());
            let radius = DOT_SIZE / 2.0;
            ui.painter().circle_filled(rect.center(), radius, dot_color(&row.color));
            if needs_outline(&row.color) {
                ui.painter()
                    .circle_stroke(rect.center(), radius - 0.5, Stroke::new(1.0, Color32::BLACK));
            }
            ui.add_space(8.0);
            ui.label(RichText::new(&row.label).size(14.0).color(ROW_TEXT_COLOR));
        });
        ui.add_space(12.0);
    }
}
