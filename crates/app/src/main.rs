use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use tower::TowerController;

#[cfg(not(target_arch = "wasm32"))]
mod capture;

fn main() {
    let mut app = App::new();

    let plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Skyline".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    });
    // Wireframe slabs need polygon-mode lines, which WebGL2 lacks.
    #[cfg(not(target_arch = "wasm32"))]
    let plugins = plugins.set(bevy::render::RenderPlugin {
        render_creation: bevy::render::settings::RenderCreation::Automatic(
            bevy::render::settings::WgpuSettings {
                features: bevy::render::settings::WgpuFeatures::POLYGON_MODE_LINE,
                ..default()
            },
        ),
        ..default()
    });

    app.add_plugins(plugins)
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
        })
        // Inserted before the plugins so `init_resource` keeps the preset.
        .insert_resource(TowerController::new(tower::presets::startup_parameters()))
        .add_plugins((tower::TowerPlugin, rendering::RenderingPlugin, ui::UiPlugin));

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(bevy::pbr::wireframe::WireframePlugin);

    #[cfg(not(target_arch = "wasm32"))]
    capture::install_from_env(&mut app);

    app.run();
}
