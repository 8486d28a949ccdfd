use bevy::prelude::*;

pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod generator;
pub mod keybindings;
pub mod lighting;
pub mod palette;
pub mod params;
pub mod presets;
pub mod primitives;
pub mod walk;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use controller::{TowerChanged, TowerCommand, TowerController};
pub use error::TowerError;
pub use params::BuildingParameters;

/// Ordering for systems that react to tower commands.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TowerSet {
    /// Commands are applied to the controller.
    Commands,
    /// Consumers of `TowerChanged` run after this point.
    Apply,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Owns the tower model: parameters, the live subtree and the command queue.
///
/// Insert a `TowerController` before adding the plugin to start from
/// something other than the defaults.
pub struct TowerPlugin;

impl Plugin for TowerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TowerController>()
            .init_resource::<keybindings::KeyBindings>()
            .add_event::<TowerCommand>()
            .add_event::<TowerChanged>()
            .configure_sets(Update, (TowerSet::Commands, TowerSet::Apply).chain())
            .add_systems(Startup, controller::build_initial_tower)
            .add_systems(
                Update,
                controller::process_tower_commands.in_set(TowerSet::Commands),
            );
    }
}
