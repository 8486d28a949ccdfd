//! Conversion from renderer-independent tower primitives to Bevy meshes and
//! `StandardMaterial`s, plus the `LineData` helper for line-list meshes
//! (outline edges and the ground grid).

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use tower::primitives::{Shape, SurfaceMaterial};

/// Scale from a primitive's emissive intensity to `StandardMaterial`
/// emissive luminance under the camera's base exposure.
pub const EMISSIVE_NITS: f32 = 600.0;

// ---------------------------------------------------------------------------
// LineData
// ---------------------------------------------------------------------------

/// Accumulates colored line segments for a `LineList` mesh.
#[derive(Default)]
pub struct LineData {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
}

impl LineData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.positions.extend_from_slice(&[a.to_array(), b.to_array()]);
        self.colors.extend_from_slice(&[color; 2]);
    }

    /// The twelve edges of an axis-aligned box centred on the origin.
    pub fn add_box_edges(&mut self, half: Vec3, color: [f32; 4]) {
        let corner = |x: f32, y: f32, z: f32| Vec3::new(x * half.x, y * half.y, z * half.z);
        for (sy, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.add_segment(corner(-1.0, sy, sz), corner(1.0, sy, sz), color);
        }
        for (sx, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.add_segment(corner(sx, -1.0, sz), corner(sx, 1.0, sz), color);
        }
        for (sx, sy) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.add_segment(corner(sx, sy, -1.0), corner(sx, sy, 1.0), color);
        }
    }

    /// A square grid on the XZ plane, `size` wide with `divisions` cells per
    /// side. The two centre lines use `center_color`.
    pub fn add_grid(
        &mut self,
        size: f32,
        divisions: u32,
        center_color: [f32; 4],
        line_color: [f32; 4],
    ) {
        let half = size * 0.5;
        let step = size / divisions as f32;
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            let color = if i * 2 == divisions {
                center_color
            } else {
                line_color
            };
            self.add_segment(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color);
            self.add_segment(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color);
        }
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn into_mesh(self) -> Mesh {
        let normals = vec![[0.0, 1.0, 0.0]; self.positions.len()];
        let indices: Vec<u32> = (0..self.positions.len() as u32).collect();
        Mesh::new(
            PrimitiveTopology::LineList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
        .with_inserted_indices(Indices::U32(indices))
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Build the mesh for a primitive's shape, centred on its local origin.
pub fn shape_mesh(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Box {
            width,
            height,
            depth,
        } => Mesh::from(Cuboid::new(width, height, depth)),
        Shape::BoxEdges {
            width,
            height,
            depth,
        } => {
            let mut lines = LineData::new();
            lines.add_box_edges(Vec3::new(width, height, depth) * 0.5, [1.0; 4]);
            lines.into_mesh()
        }
        Shape::Frustum {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => Mesh::from(
            ConicalFrustum {
                radius_top,
                radius_bottom,
                height,
            }
            .mesh()
            .resolution(segments),
        ),
        Shape::Cone {
            radius,
            height,
            segments,
        } => Mesh::from(Cone { radius, height }.mesh().resolution(segments)),
        Shape::Panel { width, height } => Mesh::from(Rectangle::new(width, height)),
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Emissive luminance for a surface, scaled for the scene exposure.
pub fn emissive_of(surface: &SurfaceMaterial) -> LinearRgba {
    surface.emissive.to_linear() * (surface.emissive_intensity * EMISSIVE_NITS)
}

pub fn standard_material(surface: &SurfaceMaterial) -> StandardMaterial {
    let base_color = surface.base_color.with_alpha(surface.opacity);
    StandardMaterial {
        base_color,
        emissive: emissive_of(surface),
        metallic: surface.metallic,
        perceptual_roughness: surface.roughness,
        reflectance: surface.reflectance,
        clearcoat: surface.clearcoat,
        clearcoat_perceptual_roughness: surface.clearcoat_roughness,
        specular_transmission: surface.transmission,
        thickness: surface.thickness,
        alpha_mode: if surface.is_transparent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        unlit: surface.unlit,
        double_sided: surface.unlit,
        cull_mode: if surface.unlit {
            None
        } else {
            Some(bevy::render::render_resource::Face::Back)
        },
        ..default()
    }
}

/// Substitute for primitives that were generated without a material.
pub fn fallback_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(0.8, 0.8, 0.8),
        perceptual_roughness: 0.8,
        ..default()
    }
}
