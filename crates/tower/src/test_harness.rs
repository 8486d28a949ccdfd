//! # TestTower: headless harness for controller integration tests
//!
//! Wraps a Bevy `App` with `MinimalPlugins` and `TowerPlugin` so the
//! command pipeline can be driven frame by frame without a window.

use bevy::prelude::*;

use crate::controller::{TowerChanged, TowerCommand, TowerController};
use crate::lighting::LightingMode;
use crate::params::BuildingParameters;
use crate::primitives::TowerSubtree;
use crate::TowerPlugin;

/// Collects every `TowerChanged` event so tests can inspect them after the
/// frame that produced them.
#[derive(Resource, Default)]
struct ChangeLog(Vec<TowerChanged>);

fn record_changes(mut events: EventReader<TowerChanged>, mut log: ResMut<ChangeLog>) {
    log.0.extend(events.read().copied());
}

pub struct TestTower {
    app: App,
}

impl Default for TestTower {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTower {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A tower built from the default parameters.
    pub fn new() -> Self {
        Self::with_params(BuildingParameters::default())
    }

    pub fn with_params(params: BuildingParameters) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Insert the controller BEFORE TowerPlugin so init_resource keeps it.
        app.insert_resource(TowerController::new(params));
        app.add_plugins(TowerPlugin);
        app.init_resource::<ChangeLog>();
        app.add_systems(Update, record_changes.after(crate::TowerSet::Commands));

        // Run one update so the Startup build executes.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue a command for the next frame.
    pub fn send(&mut self, command: TowerCommand) -> &mut Self {
        self.app.world_mut().send_event(command);
        self
    }

    /// Run `n` frames.
    pub fn tick(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.update();
        }
        self
    }

    /// Send a command and run one frame.
    pub fn apply(&mut self, command: TowerCommand) -> &mut Self {
        self.send(command).tick(1)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn controller(&self) -> &TowerController {
        self.app.world().resource::<TowerController>()
    }

    /// The live tower. Panics if none was ever built.
    pub fn subtree(&self) -> &TowerSubtree {
        self.controller()
            .subtree()
            .expect("TestTower should always hold a live tower")
    }

    pub fn generation(&self) -> u64 {
        self.controller().state().generation()
    }

    pub fn lighting(&self) -> LightingMode {
        self.controller().lighting()
    }

    /// Drain and return every `TowerChanged` seen since the last call.
    pub fn take_changes(&mut self) -> Vec<TowerChanged> {
        std::mem::take(&mut self.app.world_mut().resource_mut::<ChangeLog>().0)
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_floor_count(&self, expected: usize) {
        let got = self.subtree().windows().count();
        assert_eq!(got, expected, "Expected {expected} facades, got {got}");
    }

    pub fn assert_all_windows_dark(&self) {
        for window in self.subtree().windows() {
            let intensity = window
                .material
                .as_ref()
                .map(|m| m.emissive_intensity)
                .unwrap_or_default();
            assert_eq!(
                intensity,
                0.0,
                "window at y={} should be dark, got: {intensity}",
                window.height()
            );
        }
    }

    pub fn assert_all_windows_lit(&self) {
        for window in self.subtree().windows() {
            let intensity = window
                .material
                .as_ref()
                .map(|m| m.emissive_intensity)
                .unwrap_or_default();
            assert!(
                (0.7..=1.2).contains(&intensity),
                "window at y={} should glow, got: {intensity}",
                window.height()
            );
        }
    }
}
