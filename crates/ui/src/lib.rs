use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use tower::TowerSet;

pub mod controls_panel;
pub mod hud;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<controls_panel::ControlsPanel>()
            .add_systems(Startup, theme::apply_skyline_theme)
            .add_systems(
                Update,
                (
                    controls_panel::controls_panel_keybind,
                    controls_panel::controls_panel_ui,
                    hud::hud_ui,
                )
                    .chain()
                    .before(TowerSet::Commands),
            );
    }
}
