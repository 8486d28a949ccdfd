use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::Exposure;

use tower::lighting::{LightingMode, SceneMood};
use tower::{TowerChanged, TowerController};

/// Camera EV100 at exposure multiplier 1.0.
pub const BASE_EV100: f32 = 9.7;
/// Illuminance in lux per unit of sun intensity.
pub const SUN_LUX_PER_UNIT: f32 = 4500.0;
/// Ambient brightness per unit of sky intensity.
pub const AMBIENT_PER_UNIT: f32 = 400.0;
/// Share of the sky color in the blended ambient color; the rest is the
/// ground bounce.
const SKY_SHARE: f32 = 0.75;

/// Marker for the scene's sun.
#[derive(Component)]
pub struct Sun;

/// EV100 for an exposure multiplier. Doubling exposure is one stop brighter.
pub fn exposure_ev100(exposure: f32) -> f32 {
    BASE_EV100 - exposure.max(f32::EPSILON).log2()
}

/// Ambient light standing in for a sky/ground hemisphere light.
pub fn ambient_for(mood: &SceneMood) -> AmbientLight {
    AmbientLight {
        color: color_lerp(mood.ground_color, mood.sky_color, SKY_SHARE),
        brightness: mood.sky_intensity * AMBIENT_PER_UNIT,
    }
}

/// Apply the mood of the current lighting mode to the lights, fog and
/// exposure whenever lighting changes.
pub fn apply_scene_mood(
    mut changes: EventReader<TowerChanged>,
    controller: Res<TowerController>,
    mut ambient: ResMut<AmbientLight>,
    mut suns: Query<&mut DirectionalLight, With<Sun>>,
    mut cameras: Query<(&mut DistanceFog, &mut Exposure), With<Camera3d>>,
) {
    if !changes
        .read()
        .any(|change| matches!(change, TowerChanged::Lighting))
    {
        return;
    }

    let mode = controller.lighting();
    let mood = SceneMood::for_mode(mode);

    *ambient = ambient_for(&mood);
    for mut sun in &mut suns {
        sun.color = mood.sun_color;
        sun.illuminance = mood.sun_intensity * SUN_LUX_PER_UNIT;
    }
    for (mut fog, mut exposure) in &mut cameras {
        fog.color = mood.fog_color;
        fog.falloff = FogFalloff::Exponential {
            density: mood.fog_density,
        };
        exposure.ev100 = exposure_ev100(mood.exposure);
    }
    info!("Scene lighting: {}", mode.label());
}

/// Spawn the sun and insert the ambient light for daytime.
pub fn setup_lighting(mut commands: Commands) {
    let mood = SceneMood::for_mode(LightingMode::Day);
    commands.insert_resource(ambient_for(&mood));

    commands.spawn((
        Sun,
        DirectionalLight {
            color: mood.sun_color,
            illuminance: mood.sun_intensity * SUN_LUX_PER_UNIT,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 50.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Linear interpolation between two f32 values.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two sRGB colors.
fn color_lerp(a: Color, b: Color, t: f32) -> Color {
    let a = a.to_srgba();
    let b = b.to_srgba();
    Color::srgb(
        lerp(a.red, b.red, t),
        lerp(a.green, b.green, t),
        lerp(a.blue, b.blue, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_ev100() {
        assert_eq!(exposure_ev100(1.0), BASE_EV100);
        // Night exposure 1.6 is brighter, so a lower EV100.
        let night = exposure_ev100(1.6);
        assert!(night < BASE_EV100);
        assert!((night - (BASE_EV100 - 1.6_f32.log2())).abs() < 1e-6);
    }

    #[test]
    fn test_night_ambient_is_dimmer() {
        let day = ambient_for(&SceneMood::for_mode(LightingMode::Day));
        let night = ambient_for(&SceneMood::for_mode(LightingMode::Night));
        assert!(night.brightness < day.brightness);
        assert!((day.brightness - AMBIENT_PER_UNIT).abs() < 1e-3);
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::srgb(0.0, 0.2, 0.4);
        let b = Color::srgb(1.0, 0.6, 0.8);
        assert_eq!(color_lerp(a, b, 0.0).to_srgba(), a.to_srgba());
        let mid = color_lerp(a, b, 0.5).to_srgba();
        assert!((mid.red - 0.5).abs() < 1e-6);
        assert!((mid.green - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_apply_scene_mood_on_lighting_change() {
        let mut app = App::new();
        app.add_event::<TowerChanged>();
        app.insert_resource(TowerController::default());
        app.insert_resource(AmbientLight::default());
        app.add_systems(Update, apply_scene_mood);
        let sun = app
            .world_mut()
            .spawn((Sun, DirectionalLight::default()))
            .id();

        app.world_mut().send_event(TowerChanged::Lighting);
        app.update();

        let day = SceneMood::for_mode(LightingMode::Day);
        let sun = app
            .world()
            .get::<DirectionalLight>(sun)
            .expect("sun exists");
        assert!((sun.illuminance - day.sun_intensity * SUN_LUX_PER_UNIT).abs() < 1e-3);
        let ambient = app.world().resource::<AmbientLight>();
        assert!((ambient.brightness - day.sky_intensity * AMBIENT_PER_UNIT).abs() < 1e-3);
    }
}
