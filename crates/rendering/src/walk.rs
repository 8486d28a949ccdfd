//! First-person walk mode.
//!
//! The walk key asks the controller for the walkable tower variant. When the
//! controller reports the variant switch, the camera hands over from the
//! orbit rig to a ground-level walker, the cursor is captured, and the street
//! props are scattered around the tower. Leaving walk mode reverses all of it.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_egui::EguiContexts;

use tower::config::{GROUND_RADIUS, PROP_COUNT};
use tower::environment::scatter_props;
use tower::generator::TowerVariant;
use tower::keybindings::KeyBindings;
use tower::{TowerChanged, TowerCommand, TowerController};

use crate::camera::OrbitCamera;
use crate::egui_input_guard::egui_wants_keyboard;
use crate::input::StatusMessage;
use crate::tower_meshes::{shape_mesh, standard_material};

const EYE_HEIGHT: f32 = 1.7;
const WALK_SPEED: f32 = 12.0;
const SPRINT_MULTIPLIER: f32 = 2.5;
const LOOK_SENSITIVITY: f32 = 0.002;
const MAX_LOOK_PITCH: f32 = 1.4;
/// Distance kept between the walker and the ground edge.
const EDGE_MARGIN: f32 = 5.0;
/// Where the walker starts, on the +Z side facing the tower.
const START_DISTANCE: f32 = 60.0;

/// First-person walker state. Only meaningful while `active`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WalkState {
    pub active: bool,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for WalkState {
    fn default() -> Self {
        Self {
            active: false,
            position: Vec3::new(0.0, EYE_HEIGHT, START_DISTANCE),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl WalkState {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Horizontal forward and right vectors for the current yaw.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        (forward, right)
    }
}

/// Decorative prop spawned for walk mode.
#[derive(Component)]
pub struct WalkProp;

pub fn walk_active(walk: Res<WalkState>) -> bool {
    walk.active
}

/// Walk key: ask for the other tower variant.
pub fn toggle_walk_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut contexts: EguiContexts,
    controller: Res<TowerController>,
    mut commands: EventWriter<TowerCommand>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if bindings.toggle_walk_mode.just_pressed(&keyboard) {
        let next = match controller.variant() {
            TowerVariant::Showcase => TowerVariant::Walkable,
            TowerVariant::Walkable => TowerVariant::Showcase,
        };
        commands.send(TowerCommand::SetVariant(next));
    }
}

/// Lights key: debounced by the controller using the press time.
pub fn walk_lights_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    time: Res<Time>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<TowerCommand>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if bindings.toggle_lights.just_pressed(&keyboard) {
        commands.send(TowerCommand::ToggleLightsOn {
            now_secs: time.elapsed_secs_f64(),
        });
    }
}

/// React to the controller switching variants.
#[allow(clippy::too_many_arguments)]
pub fn sync_walk_mode(
    mut commands: Commands,
    mut changes: EventReader<TowerChanged>,
    controller: Res<TowerController>,
    mut walk: ResMut<WalkState>,
    mut orbit: ResMut<OrbitCamera>,
    mut status: ResMut<StatusMessage>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    props: Query<Entity, With<WalkProp>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !changes
        .read()
        .any(|change| matches!(change, TowerChanged::Variant))
    {
        return;
    }

    let entering = controller.variant() == TowerVariant::Walkable;
    if entering == walk.active {
        return;
    }

    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor_options.grab_mode = if entering {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        window.cursor_options.visible = !entering;
    }

    if entering {
        *walk = WalkState {
            active: true,
            ..default()
        };
        let seed = u64::from(controller.params().seed);
        for prop in scatter_props(seed, PROP_COUNT) {
            commands
                .spawn((WalkProp, prop.transform, Visibility::default()))
                .with_children(|parent| {
                    for part in &prop.parts {
                        let Some(surface) = &part.material else {
                            continue;
                        };
                        parent.spawn((
                            Mesh3d(meshes.add(shape_mesh(&part.shape))),
                            MeshMaterial3d(materials.add(standard_material(surface))),
                            part.transform,
                        ));
                    }
                });
        }
        info!("Entered walk mode with {} props", PROP_COUNT);
        status.set("Walk mode: WASD to move, L for window lights", false);
    } else {
        walk.active = false;
        for entity in &props {
            commands.entity(entity).despawn_recursive();
        }
        // Re-apply the orbit rig to the camera.
        orbit.set_changed();
        info!("Left walk mode");
        status.set("Orbit mode", false);
    }
}

pub fn walk_look(mut motion: EventReader<MouseMotion>, mut walk: ResMut<WalkState>) {
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }
    walk.yaw -= delta.x * LOOK_SENSITIVITY;
    walk.pitch = (walk.pitch - delta.y * LOOK_SENSITIVITY).clamp(-MAX_LOOK_PITCH, MAX_LOOK_PITCH);
}

pub fn walk_move(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    time: Res<Time>,
    controller: Res<TowerController>,
    mut walk: ResMut<WalkState>,
) {
    let mut input = Vec2::ZERO;
    if bindings.walk_forward.pressed(&keyboard) {
        input.y += 1.0;
    }
    if bindings.walk_backward.pressed(&keyboard) {
        input.y -= 1.0;
    }
    if bindings.walk_right.pressed(&keyboard) {
        input.x += 1.0;
    }
    if bindings.walk_left.pressed(&keyboard) {
        input.x -= 1.0;
    }
    if input == Vec2::ZERO {
        return;
    }

    let speed = if bindings.sprint.pressed(&keyboard) {
        WALK_SPEED * SPRINT_MULTIPLIER
    } else {
        WALK_SPEED
    };
    let params = controller.params();
    let keep_out = params.base_width.max(params.base_depth) * 0.75 + 1.0;
    let next = step_walker(&walk, input, speed * time.delta_secs(), keep_out);
    walk.position = next;
}

/// Move the walker by `distance` along `input` (x = strafe, y = forward),
/// staying on the ground disc and outside the tower footprint.
pub fn step_walker(walk: &WalkState, input: Vec2, distance: f32, keep_out: f32) -> Vec3 {
    let (forward, right) = walk.basis();
    let direction = (forward * input.y + right * input.x).normalize_or_zero();
    let mut next = walk.position + direction * distance;

    let mut flat = Vec2::new(next.x, next.z);
    let radius = flat.length();
    let max_radius = GROUND_RADIUS - EDGE_MARGIN;
    if radius > max_radius {
        flat *= max_radius / radius;
    } else if radius < keep_out {
        flat = if radius > f32::EPSILON {
            flat * (keep_out / radius)
        } else {
            Vec2::new(0.0, keep_out)
        };
    }
    next.x = flat.x;
    next.z = flat.y;
    next.y = EYE_HEIGHT;
    next
}

pub fn apply_walk_camera(walk: Res<WalkState>, mut query: Query<&mut Transform, With<Camera3d>>) {
    if !walk.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(walk.position).with_rotation(walk.rotation());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_at_zero_yaw_is_negative_z() {
        let walk = WalkState::default();
        let next = step_walker(&walk, Vec2::Y, 2.0, 10.0);
        assert!((next - Vec3::new(0.0, EYE_HEIGHT, START_DISTANCE - 2.0)).length() < 1e-4);
    }

    #[test]
    fn test_camera_looks_along_forward() {
        let walk = WalkState {
            yaw: 0.7,
            ..Default::default()
        };
        let (forward, _) = walk.basis();
        let looking = walk.rotation() * Vec3::NEG_Z;
        assert!((looking - forward).length() < 1e-4, "got: {looking}");
    }

    #[test]
    fn test_walker_cannot_enter_tower() {
        let walk = WalkState {
            position: Vec3::new(0.0, EYE_HEIGHT, 12.0),
            ..Default::default()
        };
        let next = step_walker(&walk, Vec2::Y, 20.0, 11.5);
        let r = Vec2::new(next.x, next.z).length();
        assert!((r - 11.5).abs() < 1e-3, "got: {r}");
    }

    #[test]
    fn test_walker_stays_on_ground() {
        let walk = WalkState {
            position: Vec3::new(0.0, EYE_HEIGHT, GROUND_RADIUS - 6.0),
            ..Default::default()
        };
        let next = step_walker(&walk, Vec2::NEG_Y, 50.0, 10.0);
        let r = Vec2::new(next.x, next.z).length();
        assert!(r <= GROUND_RADIUS - EDGE_MARGIN + 1e-3, "got: {r}");
        assert_eq!(next.y, EYE_HEIGHT);
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let walk = WalkState::default();
        let straight = step_walker(&walk, Vec2::Y, 1.0, 0.0);
        let diagonal = step_walker(&walk, Vec2::new(1.0, 1.0), 1.0, 0.0);
        let d1 = (straight - walk.position).length();
        let d2 = (diagonal - walk.position).length();
        assert!((d1 - d2).abs() < 1e-4);
    }
}
