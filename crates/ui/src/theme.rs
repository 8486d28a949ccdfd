use bevy_egui::{egui, EguiContexts};

/// Panel fill, slightly translucent so the tower stays visible behind it.
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(14, 20, 32, 225);
/// Accent used for active widgets and the selection highlight.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(120, 180, 235);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(235, 110, 100);
pub const STATUS_TEXT: egui::Color32 = egui::Color32::from_rgb(200, 225, 245);

/// Night-sky palette matching the ground and grid colors of the scene.
pub fn apply_skyline_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let inactive = egui::Color32::from_rgb(30, 44, 62);
    let hover = egui::Color32::from_rgb(44, 64, 88);

    let widgets = &mut style.visuals.widgets;
    widgets.noninteractive.bg_fill = PANEL_FILL;
    for (state, fill) in [
        (&mut widgets.inactive, inactive),
        (&mut widgets.hovered, hover),
        (&mut widgets.active, ACCENT),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.corner_radius = egui::CornerRadius::same(4);
    }
    widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);

    style.visuals.window_fill = PANEL_FILL;
    style.visuals.panel_fill = PANEL_FILL;
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(10, 14, 22);
    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    ctx.set_style(style);
}
