//! Decorative walk-mode surroundings: parked cars and palm trees scattered on
//! a ring around the tower.
//!
//! Placement uses a seeded `ChaCha8Rng` so a given seed always produces the
//! same street scene.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{PALM_TRUNK_MAX, PALM_TRUNK_MIN, PROP_RING_INNER, PROP_RING_OUTER};
use crate::palette;
use crate::primitives::{Primitive, PrimitiveKind, Shape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropKind {
    Car,
    PalmTree { trunk_height: f32 },
}

/// One placed prop: a transform for the group and its parts relative to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub transform: Transform,
    pub parts: Vec<Primitive>,
}

/// Scatter `count` props on the ring between `PROP_RING_INNER` and
/// `PROP_RING_OUTER`.
pub fn scatter_props(seed: u64, count: usize) -> Vec<Prop> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let radius = rng.gen_range(PROP_RING_INNER..PROP_RING_OUTER);
            let yaw = rng.gen_range(0.0..TAU);
            let transform = Transform::from_xyz(angle.cos() * radius, 0.0, angle.sin() * radius)
                .with_rotation(Quat::from_rotation_y(yaw));
            if rng.gen_bool(0.5) {
                Prop {
                    kind: PropKind::Car,
                    transform,
                    parts: car_parts(),
                }
            } else {
                let trunk_height = rng.gen_range(PALM_TRUNK_MIN..PALM_TRUNK_MAX);
                Prop {
                    kind: PropKind::PalmTree { trunk_height },
                    transform,
                    parts: palm_parts(trunk_height),
                }
            }
        })
        .collect()
}

fn part(shape: Shape, transform: Transform, material: crate::primitives::SurfaceMaterial) -> Primitive {
    Primitive::new(PrimitiveKind::Prop, shape, transform, material).with_shadows(true, true)
}

/// Stylised car: body, cabin and four wheels lying on their side.
pub fn car_parts() -> Vec<Primitive> {
    let mut parts = vec![
        part(
            Shape::Box {
                width: 4.0,
                height: 1.5,
                depth: 2.0,
            },
            Transform::from_xyz(0.0, 0.75, 0.0),
            palette::car_body_material(),
        ),
        part(
            Shape::Box {
                width: 2.0,
                height: 1.0,
                depth: 1.8,
            },
            Transform::from_xyz(0.0, 2.25, 0.0),
            palette::car_cabin_material(),
        ),
    ];

    for (x, z) in [(1.5, 1.2), (-1.5, 1.2), (1.5, -1.2), (-1.5, -1.2)] {
        parts.push(part(
            Shape::Frustum {
                radius_top: 0.7,
                radius_bottom: 0.7,
                height: 0.5,
                segments: 12,
            },
            Transform::from_xyz(x, 0.5, z).with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            palette::wheel_material(),
        ));
    }
    parts
}

/// Palm tree: tapered trunk topped by a cone of leaves.
pub fn palm_parts(trunk_height: f32) -> Vec<Primitive> {
    vec![
        part(
            Shape::Frustum {
                radius_top: 1.5,
                radius_bottom: 2.0,
                height: trunk_height,
                segments: 8,
            },
            Transform::from_xyz(0.0, trunk_height * 0.5, 0.0),
            palette::palm_trunk_material(),
        ),
        part(
            Shape::Cone {
                radius: 8.0,
                height: 20.0,
                segments: 8,
            },
            Transform::from_xyz(0.0, trunk_height, 0.0),
            palette::palm_leaves_material(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_is_deterministic() {
        assert_eq!(scatter_props(7, 16), scatter_props(7, 16));
        assert_ne!(scatter_props(7, 16), scatter_props(8, 16));
    }

    #[test]
    fn test_props_stay_on_ring() {
        for prop in scatter_props(3, 64) {
            let p = prop.transform.translation;
            let r = Vec2::new(p.x, p.z).length();
            assert!(
                (PROP_RING_INNER - 1e-3..=PROP_RING_OUTER + 1e-3).contains(&r),
                "prop at radius {r}"
            );
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_palm_trunk_height_in_range() {
        for prop in scatter_props(11, 64) {
            if let PropKind::PalmTree { trunk_height } = prop.kind {
                assert!((PALM_TRUNK_MIN..PALM_TRUNK_MAX).contains(&trunk_height));
                assert_eq!(prop.parts.len(), 2);
            }
        }
    }

    #[test]
    fn test_car_has_body_cabin_and_wheels() {
        let parts = car_parts();
        assert_eq!(parts.len(), 6);
        assert!(parts.iter().all(|p| p.kind == PrimitiveKind::Prop));
    }
}
