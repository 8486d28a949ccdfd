//! Day/night switching and seed changes through the command queue.

use crate::controller::{TowerChanged, TowerCommand};
use crate::lighting::{window_hash, LightingMode};
use crate::params::BuildingParameters;
use crate::test_harness::TestTower;

#[test]
fn test_toggle_to_night_lights_every_window() {
    let mut tower = TestTower::new();
    tower.assert_all_windows_dark();
    tower.take_changes();

    tower.apply(TowerCommand::ToggleLighting);
    assert_eq!(tower.lighting(), LightingMode::Night);
    tower.assert_all_windows_lit();
    assert_eq!(tower.take_changes(), vec![TowerChanged::Lighting]);
    assert_eq!(tower.generation(), 1);
}

#[test]
fn test_back_to_day_restores_dark_glass() {
    let mut tower = TestTower::new();
    let day = tower.subtree().clone();
    tower
        .apply(TowerCommand::ToggleLighting)
        .apply(TowerCommand::ToggleLighting);
    tower.assert_all_windows_dark();
    assert_eq!(tower.subtree(), &day);
}

#[test]
fn test_night_survives_regeneration() {
    let mut tower = TestTower::new();
    tower.apply(TowerCommand::SetLighting(LightingMode::Night));
    tower.apply(TowerCommand::ParameterChanged(BuildingParameters {
        floors: 30,
        ..Default::default()
    }));
    tower.assert_floor_count(30);
    tower.assert_all_windows_lit();
}

#[test]
fn test_seed_change_relights_in_place() {
    let mut tower = TestTower::new();
    tower.apply(TowerCommand::SetLighting(LightingMode::Night));
    tower.take_changes();

    tower.apply(TowerCommand::SetSeed(42));
    assert_eq!(tower.controller().params().seed, 42);
    assert_eq!(tower.generation(), 1);
    assert_eq!(tower.take_changes(), vec![TowerChanged::Lighting]);

    for window in tower.subtree().windows() {
        let expected = 0.7 + 0.5 * window_hash(42, window.height());
        let got = window
            .material
            .as_ref()
            .map(|m| m.emissive_intensity)
            .unwrap_or_default();
        assert!((got - expected).abs() < 1e-6, "got: {got}");
    }
}

#[test]
fn test_seed_change_by_day_keeps_windows_dark() {
    let mut tower = TestTower::new();
    tower.apply(TowerCommand::SetSeed(500));
    tower.assert_all_windows_dark();
}

#[test]
fn test_same_lighting_mode_is_a_no_op() {
    let mut tower = TestTower::new();
    tower.take_changes();
    tower.apply(TowerCommand::SetLighting(LightingMode::Day));
    assert!(tower.take_changes().is_empty());
}
