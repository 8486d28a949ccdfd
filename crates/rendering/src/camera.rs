use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::Exposure;
use bevy_egui::EguiContexts;

use tower::lighting::{LightingMode, SceneMood};
use tower::TowerController;

use crate::day_night::exposure_ev100;
use crate::egui_input_guard::egui_wants_pointer;
use crate::walk::WalkState;

const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 12.0;
const MAX_DISTANCE: f32 = 400.0;
const MIN_PITCH: f32 = 2.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Radians per second of auto-rotation at speed 1.0 (one turn per minute).
pub const AUTO_ROTATE_RATE: f32 = std::f32::consts::TAU / 60.0;

/// Orbital camera model: camera orbits around a focus point on the tower axis.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    /// Matches a camera at (28, 24, 42) looking at the origin.
    fn default() -> Self {
        let offset = Vec3::new(28.0, 24.0, 42.0);
        let distance = offset.length();
        Self {
            focus: Vec3::ZERO,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let (pos, look_at) = orbit_to_transform(&orbit);
    let mood = SceneMood::for_mode(LightingMode::Day);

    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 2000.0,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Exposure {
            ev100: exposure_ev100(mood.exposure),
        },
        DistanceFog {
            color: mood.fog_color,
            falloff: FogFalloff::Exponential {
                density: mood.fog_density,
            },
            ..default()
        },
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

pub fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    let pos = orbit.focus + Vec3::new(x, y, z);
    (pos, orbit.focus)
}

/// Run condition: the orbit camera owns the view.
pub fn orbit_active(walk: Res<WalkState>) -> bool {
    !walk.active
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// Left-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
                orbit.pitch =
                    (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
            }
            drag.last_pos = pos;
        }
    }
}

pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitCamera>,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        orbit.distance = zoomed_distance(orbit.distance, dy);
    }
}

fn zoomed_distance(distance: f32, scroll: f32) -> f32 {
    let factor = 1.0 - scroll * ZOOM_SPEED;
    (distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE)
}

/// Spin the camera around the tower while auto-rotate is on.
pub fn camera_auto_rotate(
    time: Res<Time>,
    controller: Res<TowerController>,
    drag: Res<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let params = controller.params();
    if !params.auto_rotate || drag.dragging {
        return;
    }
    let step = auto_rotate_step(params.rotation_speed, time.delta_secs());
    if step != 0.0 {
        orbit.yaw += step;
    }
}

/// Yaw advanced in `dt` seconds at the given speed multiplier.
pub fn auto_rotate_step(speed: f32, dt: f32) -> f32 {
    AUTO_ROTATE_RATE * speed * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orbit_reproduces_initial_camera() {
        let (pos, look_at) = orbit_to_transform(&OrbitCamera::default());
        assert!((pos - Vec3::new(28.0, 24.0, 42.0)).length() < 1e-3, "got: {pos}");
        assert_eq!(look_at, Vec3::ZERO);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(zoomed_distance(MIN_DISTANCE, 10.0), MIN_DISTANCE);
        assert_eq!(zoomed_distance(MAX_DISTANCE, -10.0), MAX_DISTANCE);
        assert!(zoomed_distance(100.0, 1.0) < 100.0);
    }

    #[test]
    fn test_auto_rotate_speed() {
        // Speed 1.0 completes a full turn in sixty seconds.
        let turn = auto_rotate_step(1.0, 60.0);
        assert!((turn - std::f32::consts::TAU).abs() < 1e-4);
        assert_eq!(auto_rotate_step(0.0, 1.0), 0.0);
        let slow = auto_rotate_step(0.4, 1.0);
        assert!((slow - AUTO_ROTATE_RATE * 0.4).abs() < 1e-6);
    }
}
