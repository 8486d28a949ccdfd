//! Day/night lighting state.
//!
//! `apply_lighting` rewrites the emissive state of every facade in place:
//! dark glass by day, a warm per-window glow by night. The night pattern is a
//! pure function of the seed and each facade's height, so the same seed always
//! lights the same windows the same way.

use bevy::prelude::*;

use crate::config::*;
use crate::primitives::Primitive;

/// Current lighting mode of the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LightingMode {
    #[default]
    Day,
    Night,
}

impl LightingMode {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day {
            LightingMode::Day
        } else {
            LightingMode::Night
        }
    }

    pub fn is_day(self) -> bool {
        self == LightingMode::Day
    }

    pub fn toggled(self) -> Self {
        match self {
            LightingMode::Day => LightingMode::Night,
            LightingMode::Night => LightingMode::Day,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightingMode::Day => "Day",
            LightingMode::Night => "Night",
        }
    }
}

/// Cheap deterministic hash of a seed and a height into `[0, 1)`.
///
/// Cosmetic only; not suitable for anything that needs real randomness.
pub fn window_hash(seed: u32, height: f32) -> f32 {
    let x = (seed as f64 + height as f64 * WINDOW_HASH_HEIGHT_SCALE).sin() * WINDOW_HASH_SCALE;
    let r = (x - x.floor()) as f32;
    // Rounding to f32 can land exactly on 1.0.
    r.min(1.0 - f32::EPSILON)
}

/// Emissive color and intensity of a lit window for hash value `r`.
pub fn night_glow(r: f32) -> (Color, f32) {
    let hue = (WINDOW_HUE_BASE + WINDOW_HUE_SPAN * r) * 360.0;
    let color = Color::hsl(
        hue,
        WINDOW_SATURATION,
        WINDOW_LIGHTNESS_BASE + WINDOW_LIGHTNESS_SPAN * r,
    );
    let intensity = WINDOW_INTENSITY_BASE + WINDOW_INTENSITY_SPAN * r;
    (color, intensity)
}

/// Set the emissive state of every facade for `mode`.
///
/// Facades without a material are skipped. Calling this repeatedly with the
/// same arguments leaves the facades unchanged after the first call.
pub fn apply_lighting<'a, I>(facades: I, seed: u32, mode: LightingMode)
where
    I: IntoIterator<Item = &'a mut Primitive>,
{
    for facade in facades {
        let height = facade.height();
        let Some(material) = facade.material.as_mut() else {
            continue;
        };
        match mode {
            LightingMode::Day => {
                material.emissive = Color::BLACK;
                material.emissive_intensity = 0.0;
            }
            LightingMode::Night => {
                let (color, intensity) = night_glow(window_hash(seed, height));
                material.emissive = color;
                material.emissive_intensity = intensity;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scene mood
// ---------------------------------------------------------------------------

/// Scene-wide lighting that accompanies a lighting mode: exposure, fog, and
/// the sky/sun lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMood {
    pub exposure: f32,
    pub fog_density: f32,
    pub fog_color: Color,
    pub sky_color: Color,
    pub ground_color: Color,
    pub sky_intensity: f32,
    pub sun_color: Color,
    pub sun_intensity: f32,
}

impl SceneMood {
    pub fn for_mode(mode: LightingMode) -> Self {
        let fog_color = Color::srgb_u8(0x0b, 0x0f, 0x14);
        match mode {
            LightingMode::Day => Self {
                exposure: 1.0,
                fog_density: 0.018,
                fog_color,
                sky_color: Color::srgb_u8(0xcf, 0xe9, 0xff),
                ground_color: Color::srgb_u8(0x0c, 0x10, 0x16),
                sky_intensity: 1.0,
                sun_color: Color::WHITE,
                sun_intensity: 2.2,
            },
            LightingMode::Night => Self {
                exposure: 1.6,
                fog_density: 0.035,
                fog_color,
                sky_color: Color::srgb_u8(0x20, 0x30, 0x40),
                ground_color: Color::srgb_u8(0x04, 0x07, 0x0b),
                sky_intensity: 0.3,
                sun_color: Color::srgb_u8(0xa0, 0xb8, 0xff),
                sun_intensity: 0.9,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::params::BuildingParameters;
    use crate::primitives::{PrimitiveKind, Shape, SurfaceMaterial};

    fn facade_at(y: f32) -> Primitive {
        Primitive::new(
            PrimitiveKind::Facade,
            Shape::Box {
                width: 10.0,
                height: 3.0,
                depth: 8.0,
            },
            Transform::from_xyz(0.0, y, 0.0),
            SurfaceMaterial::default(),
        )
    }

    #[test]
    fn test_window_hash_in_unit_range() {
        for seed in [1, 2, 99, 999] {
            for i in 0..60 {
                let r = window_hash(seed, i as f32 * 3.6);
                assert!((0.0..1.0).contains(&r), "hash out of range: {r}");
            }
        }
    }

    #[test]
    fn test_day_is_idempotent() {
        let mut subtree = generate(&BuildingParameters::default()).expect("valid params");
        apply_lighting(subtree.windows_mut(), 5, LightingMode::Night);

        apply_lighting(subtree.windows_mut(), 5, LightingMode::Day);
        let once = subtree.clone();
        apply_lighting(subtree.windows_mut(), 5, LightingMode::Day);
        assert_eq!(once, subtree);

        for facade in subtree.windows() {
            let material = facade.material.as_ref().expect("facade material");
            assert_eq!(material.emissive, Color::BLACK);
            assert_eq!(material.emissive_intensity, 0.0);
        }
    }

    #[test]
    fn test_night_is_deterministic() {
        let params = BuildingParameters::default();
        let mut a = generate(&params).expect("valid params");
        let mut b = generate(&params).expect("valid params");
        apply_lighting(a.windows_mut(), 42, LightingMode::Night);
        apply_lighting(b.windows_mut(), 42, LightingMode::Night);
        assert_eq!(a, b);

        // Re-applying the same night lighting changes nothing.
        let before = a.clone();
        apply_lighting(a.windows_mut(), 42, LightingMode::Night);
        assert_eq!(before, a);
    }

    #[test]
    fn test_night_hue_for_seed_one_at_height_36() {
        let mut first = [facade_at(36.0)];
        let mut second = [facade_at(36.0)];
        apply_lighting(first.iter_mut(), 1, LightingMode::Night);
        apply_lighting(second.iter_mut(), 1, LightingMode::Night);

        let material = first[0].material.as_ref().expect("material");
        let Color::Hsla(hsla) = material.emissive else {
            panic!("night glow should be an HSL color");
        };
        let r = window_hash(1, 36.0);
        assert!((hsla.hue - (0.12 + 0.08 * r) * 360.0).abs() < 1e-3);
        assert!((0.12 * 360.0..=0.20 * 360.0).contains(&hsla.hue));
        assert!((hsla.saturation - 0.8).abs() < 1e-6);
        assert!((material.emissive_intensity - (0.7 + 0.5 * r)).abs() < 1e-6);

        assert_eq!(first[0], second[0]);
    }

    #[test]
    fn test_different_seeds_vary_pattern() {
        let params = BuildingParameters::default();
        let mut a = generate(&params).expect("valid params");
        let mut b = generate(&params).expect("valid params");
        apply_lighting(a.windows_mut(), 1, LightingMode::Night);
        apply_lighting(b.windows_mut(), 2, LightingMode::Night);
        assert_ne!(a, b);
    }

    #[test]
    fn test_facade_without_material_is_skipped() {
        let mut bare = facade_at(10.0);
        bare.material = None;
        let mut facades = [bare];
        apply_lighting(facades.iter_mut(), 3, LightingMode::Night);
        assert!(facades[0].material.is_none());
    }

    #[test]
    fn test_lighting_mode_toggle() {
        assert_eq!(LightingMode::Day.toggled(), LightingMode::Night);
        assert_eq!(LightingMode::Night.toggled(), LightingMode::Day);
        assert_eq!(LightingMode::from_is_day(false), LightingMode::Night);
        assert!(LightingMode::default().is_day());
    }

    #[test]
    fn test_night_mood_is_darker_and_foggier() {
        let day = SceneMood::for_mode(LightingMode::Day);
        let night = SceneMood::for_mode(LightingMode::Night);
        assert!(night.sky_intensity < day.sky_intensity);
        assert!(night.sun_intensity < day.sun_intensity);
        assert!(night.fog_density > day.fog_density);
        assert!(night.exposure > day.exposure);
    }
}
