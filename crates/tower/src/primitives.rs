//! Scene primitives and the arena that owns them.
//!
//! A generated tower is a flat arena of `Primitive`s held by a single
//! `TowerSubtree`. Dropping the subtree drops every primitive and its owned
//! material; nothing else holds references into it.

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Renderer-independent surface description owned by one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub base_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    pub reflectance: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub transmission: f32,
    pub thickness: f32,
    /// 1.0 is fully opaque; anything lower renders blended.
    pub opacity: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub wireframe: bool,
    /// Ignore scene lighting entirely (outlines, light planes).
    pub unlit: bool,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            base_color: Color::WHITE,
            metallic: 0.0,
            roughness: 0.5,
            reflectance: 0.5,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            transmission: 0.0,
            thickness: 0.0,
            opacity: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            wireframe: false,
            unlit: false,
        }
    }
}

impl SurfaceMaterial {
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Geometry of a primitive, centred on its transform's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Line-only edges of a box.
    BoxEdges {
        width: f32,
        height: f32,
        depth: f32,
    },
    Frustum {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        segments: u32,
    },
    /// Flat rectangle in the local XY plane facing +Z.
    Panel { width: f32, height: f32 },
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Role of a primitive inside the tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Slab,
    /// Glazed floor panel; the only kind eligible for window lighting.
    Facade,
    Outline,
    Core,
    Crown,
    Fin,
    /// Emissive window plane toggled by the walk-mode lights switch.
    LightPlane,
    /// Rooftop clutter of the walkable variant.
    Detail,
    /// Part of a decorative walk-mode prop (car, palm tree).
    Prop,
}

/// Index of a primitive inside its `TowerSubtree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub shape: Shape,
    /// Transform relative to the subtree root.
    pub transform: Transform,
    /// `None` means no material was ever assigned; the renderer substitutes
    /// its fallback.
    pub material: Option<SurfaceMaterial>,
    /// Floor the primitive belongs to, if any.
    pub floor: Option<u32>,
    pub visible: bool,
    pub casts_shadow: bool,
    pub receives_shadow: bool,
}

impl Primitive {
    pub fn new(
        kind: PrimitiveKind,
        shape: Shape,
        transform: Transform,
        material: SurfaceMaterial,
    ) -> Self {
        Self {
            kind,
            shape,
            transform,
            material: Some(material),
            floor: None,
            visible: true,
            casts_shadow: false,
            receives_shadow: false,
        }
    }

    pub fn on_floor(mut self, floor: u32) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.casts_shadow = cast;
        self.receives_shadow = receive;
        self
    }

    pub fn is_window(&self) -> bool {
        self.kind == PrimitiveKind::Facade
    }

    /// Vertical position of the primitive's centre, relative to the root.
    pub fn height(&self) -> f32 {
        self.transform.translation.y
    }
}

// ---------------------------------------------------------------------------
// TowerSubtree
// ---------------------------------------------------------------------------

/// Root grouping object returned by the generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TowerSubtree {
    /// Transform of the group relative to the scene.
    pub root: Transform,
    primitives: Vec<Primitive>,
}

impl TowerSubtree {
    pub fn new(root: Transform) -> Self {
        Self {
            root,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.primitives.len() as u32);
        self.primitives.push(primitive);
        id
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: PrimitiveId) -> Option<&mut Primitive> {
        self.primitives.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(i, p)| (PrimitiveId(i as u32), p))
    }

    pub fn of_kind(&self, kind: PrimitiveKind) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.kind == kind)
    }

    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Facade elements in floor order.
    pub fn windows(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.is_window())
    }

    pub fn windows_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.primitives.iter_mut().filter(|p| p.is_window())
    }

    pub fn primitives_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.primitives.iter_mut()
    }

    /// Number of primitives that were generated without a material.
    pub fn missing_material_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.material.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade(y: f32) -> Primitive {
        Primitive::new(
            PrimitiveKind::Facade,
            Shape::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Transform::from_xyz(0.0, y, 0.0),
            SurfaceMaterial::default(),
        )
    }

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut subtree = TowerSubtree::default();
        let a = subtree.push(facade(0.0));
        let b = subtree.push(facade(1.0));
        assert_eq!(a, PrimitiveId(0));
        assert_eq!(b, PrimitiveId(1));
        assert_eq!(subtree.get(b).map(Primitive::height), Some(1.0));
        assert!(subtree.get(PrimitiveId(5)).is_none());
    }

    #[test]
    fn test_windows_only_yields_facades() {
        let mut subtree = TowerSubtree::default();
        subtree.push(facade(0.0));
        subtree.push(Primitive::new(
            PrimitiveKind::Slab,
            Shape::Box {
                width: 1.0,
                height: 0.1,
                depth: 1.0,
            },
            Transform::IDENTITY,
            SurfaceMaterial::default(),
        ));
        subtree.push(facade(3.0));
        assert_eq!(subtree.windows().count(), 2);
        assert_eq!(subtree.windows_mut().count(), 2);
        assert_eq!(subtree.count(PrimitiveKind::Slab), 1);
    }

    #[test]
    fn test_missing_material_count() {
        let mut subtree = TowerSubtree::default();
        let mut detail = facade(0.0);
        detail.kind = PrimitiveKind::Detail;
        detail.material = None;
        subtree.push(detail);
        subtree.push(facade(1.0));
        assert_eq!(subtree.missing_material_count(), 1);
    }
}
