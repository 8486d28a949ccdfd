//! Mirrors the controller's live `TowerSubtree` into ECS entities.
//!
//! Every primitive becomes a child of one root entity. A geometry change
//! spawns the new root and despawns the old one in the same command flush, so
//! exactly one tower is ever visible and every mesh and material handle of
//! the old tower is dropped with it. Lighting and light-plane changes update
//! the existing entities in place.

use bevy::pbr::wireframe::Wireframe;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

use tower::primitives::{Primitive, PrimitiveId, PrimitiveKind, TowerSubtree};
use tower::{TowerChanged, TowerController};

use crate::tower_meshes::{emissive_of, fallback_material, shape_mesh, standard_material};

/// Root entity of the rendered tower.
#[derive(Component)]
pub struct TowerRoot {
    pub generation: u64,
}

/// One rendered primitive.
#[derive(Component)]
pub struct TowerPart {
    pub id: PrimitiveId,
}

/// Material used for primitives that carry none.
#[derive(Resource)]
pub struct FallbackMaterial(pub Handle<StandardMaterial>);

impl FromWorld for FallbackMaterial {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self(materials.add(fallback_material()))
    }
}

/// Bookkeeping for the rendered tower.
#[derive(Resource, Default)]
pub struct TowerEntities {
    root: Option<Entity>,
    generation: u64,
    windows: Vec<(PrimitiveId, Handle<StandardMaterial>)>,
    light_planes: Vec<(PrimitiveId, Entity)>,
}

impl TowerEntities {
    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

fn visibility_of(primitive: &Primitive) -> Visibility {
    if primitive.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Rebuild the rendered tower after a geometry change.
pub fn sync_tower_geometry(
    mut commands: Commands,
    mut changes: EventReader<TowerChanged>,
    controller: Res<TowerController>,
    mut entities: ResMut<TowerEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    fallback: Res<FallbackMaterial>,
) {
    let rebuilt = changes
        .read()
        .any(|change| matches!(change, TowerChanged::Geometry { .. }));
    if !rebuilt {
        return;
    }
    let Some(subtree) = controller.subtree() else {
        return;
    };
    let generation = controller.state().generation();

    let missing = subtree.missing_material_count();
    if missing > 0 {
        warn!(
            "{} tower primitives have no material; rendering them with the fallback",
            missing
        );
    }

    let previous = entities.root.take();
    let mut windows = Vec::new();
    let mut light_planes = Vec::new();

    let root = spawn_subtree(
        &mut commands,
        subtree,
        generation,
        &mut meshes,
        &mut materials,
        &fallback.0,
        &mut windows,
        &mut light_planes,
    );

    if let Some(old) = previous {
        commands.entity(old).despawn_recursive();
    }

    *entities = TowerEntities {
        root: Some(root),
        generation,
        windows,
        light_planes,
    };
}

#[allow(clippy::too_many_arguments)]
fn spawn_subtree(
    commands: &mut Commands,
    subtree: &TowerSubtree,
    generation: u64,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    fallback: &Handle<StandardMaterial>,
    windows: &mut Vec<(PrimitiveId, Handle<StandardMaterial>)>,
    light_planes: &mut Vec<(PrimitiveId, Entity)>,
) -> Entity {
    commands
        .spawn((
            TowerRoot { generation },
            subtree.root,
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (id, primitive) in subtree.iter() {
                let material = match &primitive.material {
                    Some(surface) => materials.add(standard_material(surface)),
                    None => fallback.clone(),
                };
                let mut part = parent.spawn((
                    TowerPart { id },
                    Mesh3d(meshes.add(shape_mesh(&primitive.shape))),
                    MeshMaterial3d(material.clone()),
                    primitive.transform,
                    visibility_of(primitive),
                ));
                if !primitive.casts_shadow {
                    part.insert(NotShadowCaster);
                }
                if !primitive.receives_shadow {
                    part.insert(NotShadowReceiver);
                }
                if primitive
                    .material
                    .as_ref()
                    .is_some_and(|surface| surface.wireframe)
                {
                    part.insert(Wireframe);
                }

                if primitive.is_window() {
                    windows.push((id, material));
                } else if primitive.kind == PrimitiveKind::LightPlane {
                    light_planes.push((id, part.id()));
                }
            }
        })
        .id()
}

/// Push facade emissive state to the window materials after relighting.
pub fn sync_window_emissive(
    mut changes: EventReader<TowerChanged>,
    controller: Res<TowerController>,
    entities: Res<TowerEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !changes
        .read()
        .any(|change| matches!(change, TowerChanged::Lighting))
    {
        return;
    }
    let Some(subtree) = controller.subtree() else {
        return;
    };
    for (id, handle) in &entities.windows {
        let Some(surface) = subtree.get(*id).and_then(|p| p.material.as_ref()) else {
            continue;
        };
        if let Some(material) = materials.get_mut(handle) {
            material.emissive = emissive_of(surface);
        }
    }
}

/// Show or hide the walk-mode light planes after the lights switch flips.
pub fn sync_light_planes(
    mut changes: EventReader<TowerChanged>,
    controller: Res<TowerController>,
    entities: Res<TowerEntities>,
    mut visibility: Query<&mut Visibility, With<TowerPart>>,
) {
    if !changes
        .read()
        .any(|change| matches!(change, TowerChanged::LightPlanes))
    {
        return;
    }
    let Some(subtree) = controller.subtree() else {
        return;
    };
    for (id, entity) in &entities.light_planes {
        let (Some(primitive), Ok(mut vis)) = (subtree.get(*id), visibility.get_mut(*entity))
        else {
            continue;
        };
        *vis = visibility_of(primitive);
    }
}
