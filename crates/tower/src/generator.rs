//! Parametric tower generator.
//!
//! Turns a `BuildingParameters` value into a `TowerSubtree`: per floor a slab,
//! a glazed facade, its edge outline and a core cylinder, then a crown above
//! the top floor and a ring of vertical fins. The generator is a pure
//! function; it neither consumes randomness nor touches any previously
//! generated subtree (disposal is the caller's job).

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::config::*;
use crate::error::TowerError;
use crate::palette;
use crate::params::BuildingParameters;
use crate::primitives::{Primitive, PrimitiveKind, Shape, TowerSubtree};

/// Which flavour of tower to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TowerVariant {
    /// Orbit-view showpiece.
    #[default]
    Showcase,
    /// Walk-mode tower: adds window light planes and rooftop details.
    Walkable,
}

/// Footprint and rotation of one floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLayout {
    pub index: u32,
    pub t: f32,
    pub width: f32,
    pub depth: f32,
    pub twist: f32,
    /// Height of the floor's base above the root.
    pub base_y: f32,
}

impl FloorLayout {
    pub fn compute(params: &BuildingParameters, index: u32) -> Self {
        let t = params.floor_t(index);
        let width = lerp(params.base_width, params.base_width * (1.0 - params.taper), t);
        let depth = lerp(
            params.base_depth,
            params.base_depth * (1.0 - params.taper * DEPTH_TAPER_FACTOR),
            t,
        );
        Self {
            index,
            t,
            width,
            depth,
            twist: params.floor_twist(index),
            base_y: index as f32 * params.floor_height,
        }
    }

    fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.twist)
    }
}

/// Generate the showcase tower.
pub fn generate(params: &BuildingParameters) -> Result<TowerSubtree, TowerError> {
    generate_variant(params, TowerVariant::Showcase)
}

/// Generate a tower of the given variant.
pub fn generate_variant(
    params: &BuildingParameters,
    variant: TowerVariant,
) -> Result<TowerSubtree, TowerError> {
    params.validate()?;

    let mut subtree = TowerSubtree::new(Transform::from_xyz(0.0, ROOT_LIFT, 0.0));
    let glass = palette::glass_material();

    for index in 0..params.floors {
        let floor = FloorLayout::compute(params, index);
        emit_floor(&mut subtree, params, &floor, &glass);
        if variant == TowerVariant::Walkable {
            emit_light_planes(&mut subtree, params, &floor);
        }
    }

    emit_crown(&mut subtree, params);
    emit_fins(&mut subtree, params);

    if variant == TowerVariant::Walkable {
        emit_roof_details(&mut subtree, params);
    }

    Ok(subtree)
}

fn emit_floor(
    subtree: &mut TowerSubtree,
    params: &BuildingParameters,
    floor: &FloorLayout,
    glass: &crate::primitives::SurfaceMaterial,
) {
    let slab_height = params.slab_height();
    let clearance = params.floor_clearance();
    let rotation = floor.rotation();

    subtree.push(
        Primitive::new(
            PrimitiveKind::Slab,
            Shape::Box {
                width: floor.width + SLAB_MARGIN,
                height: slab_height,
                depth: floor.depth + SLAB_MARGIN,
            },
            Transform::from_xyz(0.0, floor.base_y + slab_height * 0.5, 0.0)
                .with_rotation(rotation),
            palette::slab_material(floor.t, params.wireframe),
        )
        .on_floor(floor.index)
        .with_shadows(true, true),
    );

    let facade_transform =
        Transform::from_xyz(0.0, floor.base_y + slab_height + clearance * 0.5, 0.0)
            .with_rotation(rotation);

    subtree.push(
        Primitive::new(
            PrimitiveKind::Facade,
            Shape::Box {
                width: floor.width,
                height: clearance,
                depth: floor.depth,
            },
            facade_transform,
            glass.clone(),
        )
        .on_floor(floor.index),
    );

    subtree.push(
        Primitive::new(
            PrimitiveKind::Outline,
            Shape::BoxEdges {
                width: floor.width,
                height: clearance,
                depth: floor.depth,
            },
            facade_transform,
            palette::outline_material(),
        )
        .on_floor(floor.index),
    );

    let core_height = clearance * CORE_HEIGHT_RATIO;
    subtree.push(
        Primitive::new(
            PrimitiveKind::Core,
            Shape::Frustum {
                radius_top: params.core_radius * CORE_TOP_RATIO,
                radius_bottom: params.core_radius,
                height: core_height,
                segments: CORE_SEGMENTS,
            },
            Transform::from_xyz(0.0, floor.base_y + slab_height + core_height * 0.5, 0.0)
                .with_rotation(Quat::from_rotation_y(floor.twist * CORE_TWIST_RATIO)),
            palette::core_material(),
        )
        .on_floor(floor.index),
    );
}

fn emit_crown(subtree: &mut TowerSubtree, params: &BuildingParameters) {
    let total_height = params.total_height();
    let crown_height = total_height * CROWN_HEIGHT_RATIO;
    subtree.push(
        Primitive::new(
            PrimitiveKind::Crown,
            Shape::Cone {
                radius: (params.base_width + params.base_depth) * CROWN_RADIUS_RATIO,
                height: crown_height,
                segments: CROWN_SEGMENTS,
            },
            Transform::from_xyz(
                0.0,
                total_height + crown_height * 0.5 + params.floor_height * CROWN_LIFT_RATIO,
                0.0,
            )
            .with_rotation(Quat::from_rotation_y(params.total_twist_deg.to_radians())),
            palette::crown_material(),
        )
        .with_shadows(true, false),
    );
}

/// Radius of the circle the fins stand on.
pub fn fin_ring_radius(params: &BuildingParameters) -> f32 {
    params.base_width.max(params.base_depth) * FIN_RING_RATIO
        + params.fin_depth * FIN_DEPTH_RING_RATIO
}

/// Angle of fin `index` around the tower axis.
pub fn fin_angle(index: u32, fin_count: u32) -> f32 {
    if fin_count == 0 {
        return 0.0;
    }
    index as f32 / fin_count as f32 * TAU
}

fn emit_fins(subtree: &mut TowerSubtree, params: &BuildingParameters) {
    let radius = fin_ring_radius(params);
    let fin_height = params.total_height() * FIN_HEIGHT_RATIO;

    for index in 0..params.fin_count {
        let angle = fin_angle(index, params.fin_count);
        let position = Vec3::new(angle.cos() * radius, fin_height * 0.5, angle.sin() * radius);
        // Face the tower's vertical axis at the fin's own height.
        let transform = Transform::from_translation(position)
            .looking_at(Vec3::new(0.0, position.y, 0.0), Vec3::Y);
        subtree.push(
            Primitive::new(
                PrimitiveKind::Fin,
                Shape::Box {
                    width: params.fin_depth,
                    height: fin_height,
                    depth: FIN_THICKNESS,
                },
                transform,
                palette::fin_material(),
            )
            .with_shadows(true, false),
        );
    }
}

fn emit_light_planes(subtree: &mut TowerSubtree, params: &BuildingParameters, floor: &FloorLayout) {
    let clearance = params.floor_clearance();
    let center_y = floor.base_y + params.slab_height() + clearance * 0.5;
    let offset = floor.depth * 0.5 + LIGHT_PLANE_OFFSET;

    for (side, extra_turn) in [(1.0_f32, 0.0_f32), (-1.0, PI)] {
        let twist = floor.rotation();
        let translation = twist * Vec3::new(0.0, 0.0, side * offset) + Vec3::Y * center_y;
        let mut plane = Primitive::new(
            PrimitiveKind::LightPlane,
            Shape::Panel {
                width: floor.width * LIGHT_PLANE_COVERAGE,
                height: clearance * LIGHT_PLANE_COVERAGE,
            },
            Transform::from_translation(translation)
                .with_rotation(twist * Quat::from_rotation_y(extra_turn)),
            palette::light_plane_material(),
        )
        .on_floor(floor.index);
        // Lights start switched off; the controller applies the current switch.
        plane.visible = false;
        subtree.push(plane);
    }
}

/// Rooftop plant boxes. These never had a material assigned and render with
/// the renderer's fallback.
fn emit_roof_details(subtree: &mut TowerSubtree, params: &BuildingParameters) {
    let top = FloorLayout::compute(params, params.floors - 1);
    let roof_y = params.total_height();
    let size = (top.width.min(top.depth) * 0.18).max(0.3);
    let spread = top.width * 0.3;

    for slot in [-1.0_f32, 0.0, 1.0] {
        let local = Vec3::new(slot * spread, size * 0.5, -top.depth * 0.25);
        let translation = top.rotation() * local + Vec3::Y * roof_y;
        subtree.push(Primitive {
            kind: PrimitiveKind::Detail,
            shape: Shape::Box {
                width: size,
                height: size,
                depth: size,
            },
            transform: Transform::from_translation(translation).with_rotation(top.rotation()),
            material: None,
            floor: Some(top.index),
            visible: true,
            casts_shadow: true,
            receives_shadow: false,
        });
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
