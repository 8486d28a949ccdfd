//! Material table for every surface the generator emits.

use bevy::prelude::*;

use crate::primitives::SurfaceMaterial;

/// Base color that marks a window light plane. The lights-on switch finds
/// planes by this color rather than by kind.
pub const LIGHT_PLANE_SENTINEL: Color = Color::srgb(1.0, 0.933, 0.533);

pub const GROUND_COLOR: Color = Color::srgb(0.055, 0.078, 0.125);
pub const GRID_CENTER_COLOR: Color = Color::srgb(0.153, 0.251, 0.333);
pub const GRID_LINE_COLOR: Color = Color::srgb(0.075, 0.133, 0.196);

/// Floor slab: steel tinted from blue at the base toward violet at the top.
pub fn slab_material(t: f32, wireframe: bool) -> SurfaceMaterial {
    let hue = (0.58 + 0.06 * t) % 1.0;
    SurfaceMaterial {
        base_color: Color::hsl(hue * 360.0, 0.12, 0.72),
        metallic: 0.55,
        roughness: 0.35,
        reflectance: 0.6,
        clearcoat: 0.6,
        clearcoat_roughness: 0.25,
        wireframe,
        ..default()
    }
}

/// Glazing shared by every facade. Each facade receives its own clone so
/// that window lighting can vary per floor.
pub fn glass_material() -> SurfaceMaterial {
    let tint = LinearRgba::from(Color::srgb_u8(0x9d, 0xc9, 0xff));
    SurfaceMaterial {
        base_color: Color::LinearRgba(LinearRgba::new(
            tint.red * 0.7,
            tint.green * 0.7,
            tint.blue * 0.7,
            1.0,
        )),
        metallic: 0.0,
        roughness: 0.1,
        transmission: 0.85,
        thickness: 0.6,
        opacity: 0.9,
        emissive: Color::BLACK,
        emissive_intensity: 0.0,
        ..default()
    }
}

pub fn outline_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x2a, 0x3d, 0x57),
        opacity: 0.55,
        unlit: true,
        ..default()
    }
}

pub fn core_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x10, 0x17, 0x22),
        metallic: 0.2,
        roughness: 0.8,
        ..default()
    }
}

pub fn crown_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0xea, 0xf6, 0xff),
        metallic: 0.8,
        roughness: 0.2,
        clearcoat: 0.6,
        ..default()
    }
}

pub fn fin_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0xaa, 0xd4, 0xff),
        metallic: 0.6,
        roughness: 0.35,
        clearcoat: 0.4,
        opacity: 0.85,
        ..default()
    }
}

pub fn light_plane_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: LIGHT_PLANE_SENTINEL,
        emissive: LIGHT_PLANE_SENTINEL,
        emissive_intensity: 1.0,
        unlit: true,
        ..default()
    }
}

pub fn ground_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: GROUND_COLOR,
        metallic: 0.1,
        roughness: 0.9,
        ..default()
    }
}

// ---------------------------------------------------------------------------
// Walk-mode props
// ---------------------------------------------------------------------------

pub fn car_body_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x5a, 0x5a, 0x5a),
        metallic: 0.8,
        roughness: 0.5,
        ..default()
    }
}

pub fn car_cabin_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x33, 0x33, 0x33),
        roughness: 0.7,
        ..default()
    }
}

pub fn wheel_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x11, 0x11, 0x11),
        roughness: 0.2,
        ..default()
    }
}

pub fn palm_trunk_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x8b, 0x5a, 0x2b),
        roughness: 0.9,
        ..default()
    }
}

pub fn palm_leaves_material() -> SurfaceMaterial {
    SurfaceMaterial {
        base_color: Color::srgb_u8(0x2e, 0x8b, 0x57),
        roughness: 0.8,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_hue_drifts_with_height() {
        let bottom = slab_material(0.0, false);
        let top = slab_material(1.0, false);
        let (Color::Hsla(b), Color::Hsla(t)) = (bottom.base_color, top.base_color) else {
            panic!("slab colors should be built in HSL");
        };
        assert!((b.hue - 0.58 * 360.0).abs() < 1e-3);
        assert!((t.hue - 0.64 * 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_glass_starts_dark_and_translucent() {
        let glass = glass_material();
        assert_eq!(glass.emissive, Color::BLACK);
        assert_eq!(glass.emissive_intensity, 0.0);
        assert!(glass.is_transparent());
    }

    #[test]
    fn test_light_plane_uses_sentinel() {
        assert_eq!(light_plane_material().base_color, LIGHT_PLANE_SENTINEL);
        assert_ne!(fin_material().base_color, LIGHT_PLANE_SENTINEL);
    }
}
