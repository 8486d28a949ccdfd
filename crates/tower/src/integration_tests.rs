//! Integration tests for the tower command pipeline using the `TestTower`
//! harness.
//!
//! These tests run `TowerPlugin` inside a headless Bevy App and verify what
//! the renderer would observe: the live subtree and the `TowerChanged`
//! notifications.

mod lighting_tests;

use crate::controller::{TowerChanged, TowerCommand};
use crate::params::BuildingParameters;
use crate::primitives::PrimitiveKind;
use crate::test_harness::TestTower;

#[test]
fn test_startup_builds_default_tower() {
    let mut tower = TestTower::new();
    tower.assert_floor_count(23);
    assert_eq!(tower.generation(), 1);
    assert_eq!(tower.subtree().count(PrimitiveKind::Fin), 6);
    assert_eq!(tower.subtree().count(PrimitiveKind::Crown), 1);

    let changes = tower.take_changes();
    assert!(
        changes.contains(&TowerChanged::Geometry { generation: 1 }),
        "got: {changes:?}"
    );
}

#[test]
fn test_startup_uses_inserted_parameters() {
    let tower = TestTower::with_params(BuildingParameters {
        floors: 10,
        fin_count: 0,
        ..Default::default()
    });
    tower.assert_floor_count(10);
    assert_eq!(tower.subtree().count(PrimitiveKind::Fin), 0);
}

#[test]
fn test_commands_apply_in_order_within_a_frame() {
    let mut tower = TestTower::new();
    tower
        .send(TowerCommand::ParameterChanged(BuildingParameters {
            floors: 15,
            ..Default::default()
        }))
        .send(TowerCommand::ParameterChanged(BuildingParameters {
            floors: 40,
            ..Default::default()
        }))
        .tick(1);
    tower.assert_floor_count(40);
    assert_eq!(tower.generation(), 3);
}

#[test]
fn test_no_commands_means_no_changes() {
    let mut tower = TestTower::new();
    tower.take_changes();
    tower.tick(5);
    assert!(tower.take_changes().is_empty());
    assert_eq!(tower.generation(), 1);
}
