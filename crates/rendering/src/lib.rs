use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use tower::config::{GRID_DIVISIONS, GRID_SIZE, GROUND_RADIUS, GROUND_SEGMENTS};
use tower::palette::{ground_material, GRID_CENTER_COLOR, GRID_LINE_COLOR};
use tower::TowerSet;

pub mod camera;
pub mod day_night;
pub mod egui_input_guard;
pub mod input;
pub mod screenshot;
pub mod tower_meshes;
pub mod tower_render;
pub mod walk;

use camera::CameraOrbitDrag;
use input::StatusMessage;
use tower_meshes::{standard_material, LineData};
use tower_render::{FallbackMaterial, TowerEntities};
use walk::WalkState;

/// Grid sits just above the ground to avoid z-fighting.
const GRID_LIFT: f32 = 0.01;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraOrbitDrag>()
            .init_resource::<StatusMessage>()
            .init_resource::<TowerEntities>()
            .init_resource::<FallbackMaterial>()
            .init_resource::<WalkState>()
            .add_systems(
                Startup,
                (camera::setup_camera, day_night::setup_lighting, setup_ground),
            )
            .add_systems(
                Update,
                (
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::camera_auto_rotate,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .run_if(camera::orbit_active),
            )
            .add_systems(
                Update,
                (
                    walk::walk_lights_key,
                    walk::walk_look,
                    walk::walk_move,
                    walk::apply_walk_camera,
                )
                    .chain()
                    .run_if(walk::walk_active),
            )
            .add_systems(
                Update,
                (
                    input::day_night_key,
                    walk::toggle_walk_mode,
                    input::tick_status_message,
                )
                    .before(TowerSet::Commands),
            )
            .add_systems(
                Update,
                (
                    tower_render::sync_tower_geometry,
                    tower_render::sync_window_emissive,
                    tower_render::sync_light_planes,
                    day_night::apply_scene_mood,
                    walk::sync_walk_mode,
                )
                    .chain()
                    .in_set(TowerSet::Apply),
            );

        // Screenshot plugin (F12 to capture)
        app.add_plugins(screenshot::ScreenshotPlugin);
    }
}

/// Ground disc and the reference grid around the tower.
fn setup_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(GROUND_RADIUS).mesh().resolution(GROUND_SEGMENTS))),
        MeshMaterial3d(materials.add(standard_material(&ground_material()))),
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        NotShadowCaster,
    ));

    let mut grid = LineData::new();
    grid.add_grid(
        GRID_SIZE,
        GRID_DIVISIONS,
        linear_rgba(GRID_CENTER_COLOR),
        linear_rgba(GRID_LINE_COLOR),
    );
    commands.spawn((
        Mesh3d(meshes.add(grid.into_mesh())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, GRID_LIFT, 0.0),
        NotShadowCaster,
    ));
}

fn linear_rgba(color: Color) -> [f32; 4] {
    let c = color.to_linear();
    [c.red, c.green, c.blue, c.alpha]
}
