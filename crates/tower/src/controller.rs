//! Tower controller: owns the parameters and the single live tower.
//!
//! UI and input systems never touch the tower directly. They send
//! `TowerCommand`s; `process_tower_commands` feeds them to the controller,
//! which decides between a full regeneration and a cheap in-place update, and
//! announces what changed with a `TowerChanged` event for the renderer.
//!
//! Rebuild ordering: the new tower is validated and fully generated first;
//! only then is the old one swapped out and released. A failed rebuild leaves
//! the previous tower live.

use bevy::prelude::*;

use crate::config::{ROTATION_SPEED_RANGE, SEED_RANGE};
use crate::error::TowerError;
use crate::generator::{generate_variant, TowerVariant};
use crate::lighting::{apply_lighting, LightingMode};
use crate::params::{BuildingParameters, ChangeScope};
use crate::primitives::{PrimitiveKind, TowerSubtree};
use crate::walk::{set_light_planes_visible, LightsSwitch};

// =============================================================================
// Commands and notifications
// =============================================================================

/// Discrete requests from the UI and input layers.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum TowerCommand {
    /// A new full parameter set was committed.
    ParameterChanged(BuildingParameters),
    /// Flip between day and night.
    ToggleLighting,
    /// Set the lighting mode explicitly.
    SetLighting(LightingMode),
    /// Change the window-lighting seed.
    SetSeed(u32),
    /// Camera motion settings; never regenerates.
    SetMotion { auto_rotate: bool, rotation_speed: f32 },
    /// Switch between the showcase and walkable towers.
    SetVariant(TowerVariant),
    /// Debounced walk-mode lights switch; carries the press time in seconds.
    ToggleLightsOn { now_secs: f64 },
    /// Rebuild from the current parameters.
    Regenerate,
}

/// What the renderer has to refresh after a command.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowerChanged {
    /// A new tower replaced the old one.
    Geometry { generation: u64 },
    /// Facade emissive state and scene mood changed.
    Lighting,
    /// Walk-mode light planes were shown or hidden.
    LightPlanes,
    /// Camera motion settings changed.
    Motion,
    /// Walk mode was entered or left.
    Variant,
}

/// Outcome of handling one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Unchanged,
    Rebuilt,
    Relit,
    MotionChanged,
    LightPlanesChanged,
    /// A debounced toggle arrived too soon and was dropped.
    Debounced,
}

// =============================================================================
// RenderState
// =============================================================================

/// The single live tower and the lighting it is shown under.
#[derive(Debug, Default)]
pub struct RenderState {
    subtree: Option<TowerSubtree>,
    lighting: LightingMode,
    generation: u64,
}

impl RenderState {
    pub fn subtree(&self) -> Option<&TowerSubtree> {
        self.subtree.as_ref()
    }

    pub fn lighting(&self) -> LightingMode {
        self.lighting
    }

    /// Incremented each time a new tower goes live.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install `next` as the live tower and hand back the previous one for
    /// release.
    fn replace(&mut self, next: TowerSubtree) -> Option<TowerSubtree> {
        self.generation += 1;
        self.subtree.replace(next)
    }
}

// =============================================================================
// TowerController
// =============================================================================

#[derive(Resource, Debug)]
pub struct TowerController {
    params: BuildingParameters,
    variant: TowerVariant,
    state: RenderState,
    lights: LightsSwitch,
}

impl Default for TowerController {
    fn default() -> Self {
        Self::new(BuildingParameters::default())
    }
}

impl TowerController {
    /// A controller with no tower yet; call `rebuild` to create one.
    pub fn new(params: BuildingParameters) -> Self {
        Self {
            params,
            variant: TowerVariant::default(),
            state: RenderState::default(),
            lights: LightsSwitch::default(),
        }
    }

    pub fn params(&self) -> &BuildingParameters {
        &self.params
    }

    pub fn variant(&self) -> TowerVariant {
        self.variant
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn subtree(&self) -> Option<&TowerSubtree> {
        self.state.subtree()
    }

    pub fn lighting(&self) -> LightingMode {
        self.state.lighting
    }

    pub fn lights_on(&self) -> bool {
        self.lights.lights_on()
    }

    /// Regenerate from the current parameters and variant.
    ///
    /// Returns the released previous tower, if there was one.
    pub fn rebuild(&mut self) -> Result<Option<TowerSubtree>, TowerError> {
        let params = self.params.clone();
        self.rebuild_with(params, self.variant)
    }

    fn rebuild_with(
        &mut self,
        params: BuildingParameters,
        variant: TowerVariant,
    ) -> Result<Option<TowerSubtree>, TowerError> {
        let mut next = generate_variant(&params, variant)?;
        apply_lighting(next.windows_mut(), params.seed, self.state.lighting);
        set_light_planes_visible(&mut next, self.lights.lights_on());

        self.params = params;
        self.variant = variant;
        Ok(self.state.replace(next))
    }

    fn relight(&mut self) {
        let seed = self.params.seed;
        let mode = self.state.lighting;
        if let Some(subtree) = self.state.subtree.as_mut() {
            apply_lighting(subtree.windows_mut(), seed, mode);
        }
    }

    fn set_lighting(&mut self, mode: LightingMode) -> Reaction {
        self.state.lighting = mode;
        self.relight();
        Reaction::Relit
    }

    /// Apply one command.
    ///
    /// On error nothing has changed: the previous parameters and tower stay
    /// live.
    pub fn handle(&mut self, command: &TowerCommand) -> Result<Reaction, TowerError> {
        match command {
            TowerCommand::ParameterChanged(next) => match self.params.change_scope(next) {
                ChangeScope::None => Ok(Reaction::Unchanged),
                ChangeScope::Motion => {
                    next.validate()?;
                    self.params = next.clone();
                    Ok(Reaction::MotionChanged)
                }
                ChangeScope::Lighting => {
                    next.validate()?;
                    self.params = next.clone();
                    self.relight();
                    Ok(Reaction::Relit)
                }
                ChangeScope::Geometry => {
                    self.rebuild_with(next.clone(), self.variant)?;
                    Ok(Reaction::Rebuilt)
                }
            },
            TowerCommand::ToggleLighting => Ok(self.set_lighting(self.state.lighting.toggled())),
            TowerCommand::SetLighting(mode) => {
                if *mode == self.state.lighting {
                    Ok(Reaction::Unchanged)
                } else {
                    Ok(self.set_lighting(*mode))
                }
            }
            TowerCommand::SetSeed(seed) => {
                if !SEED_RANGE.contains(seed) {
                    return Err(TowerError::invalid(
                        "seed",
                        format!("must be in {SEED_RANGE:?}, got {seed}"),
                    ));
                }
                if *seed == self.params.seed {
                    return Ok(Reaction::Unchanged);
                }
                self.params.seed = *seed;
                self.relight();
                Ok(Reaction::Relit)
            }
            TowerCommand::SetMotion {
                auto_rotate,
                rotation_speed,
            } => {
                if !ROTATION_SPEED_RANGE.contains(rotation_speed) {
                    return Err(TowerError::invalid(
                        "rotation_speed",
                        format!("must be in {ROTATION_SPEED_RANGE:?}, got {rotation_speed}"),
                    ));
                }
                self.params.auto_rotate = *auto_rotate;
                self.params.rotation_speed = *rotation_speed;
                Ok(Reaction::MotionChanged)
            }
            TowerCommand::SetVariant(variant) => {
                if *variant == self.variant && self.state.subtree.is_some() {
                    return Ok(Reaction::Unchanged);
                }
                self.rebuild_with(self.params.clone(), *variant)?;
                Ok(Reaction::Rebuilt)
            }
            TowerCommand::ToggleLightsOn { now_secs } => {
                // Light planes only exist in the walkable tower.
                if self.variant != TowerVariant::Walkable {
                    return Ok(Reaction::Unchanged);
                }
                if !self.lights.try_toggle(*now_secs) {
                    return Ok(Reaction::Debounced);
                }
                let on = self.lights.lights_on();
                if let Some(subtree) = self.state.subtree.as_mut() {
                    set_light_planes_visible(subtree, on);
                }
                Ok(Reaction::LightPlanesChanged)
            }
            TowerCommand::Regenerate => {
                self.rebuild()?;
                Ok(Reaction::Rebuilt)
            }
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

fn log_rebuild(controller: &TowerController, released: Option<TowerSubtree>) {
    let Some(subtree) = controller.subtree() else {
        return;
    };
    info!(
        "Tower generation {}: {} floors, {} fins, {} primitives ({:?})",
        controller.state.generation(),
        subtree.count(PrimitiveKind::Facade),
        subtree.count(PrimitiveKind::Fin),
        subtree.len(),
        controller.variant(),
    );
    if let Some(old) = released {
        debug!("Released previous tower ({} primitives)", old.len());
    }
}

/// Startup: build the first tower from the initial parameters.
pub fn build_initial_tower(
    mut controller: ResMut<TowerController>,
    mut changed: EventWriter<TowerChanged>,
) {
    match controller.rebuild() {
        Ok(released) => {
            log_rebuild(&controller, released);
            changed.send(TowerChanged::Geometry {
                generation: controller.state.generation(),
            });
            changed.send(TowerChanged::Lighting);
        }
        Err(e) => error!("Initial tower could not be generated: {}", e),
    }
}

/// Consume all pending commands, in order, between frames.
pub fn process_tower_commands(
    mut commands: EventReader<TowerCommand>,
    mut controller: ResMut<TowerController>,
    mut changed: EventWriter<TowerChanged>,
) {
    for command in commands.read() {
        let variant_before = controller.variant();
        match controller.handle(command) {
            Ok(Reaction::Rebuilt) => {
                info!("Rebuilding tower after {:?}", command_name(command));
                log_rebuild(&controller, None);
                changed.send(TowerChanged::Geometry {
                    generation: controller.state.generation(),
                });
                if controller.variant() != variant_before {
                    changed.send(TowerChanged::Variant);
                }
            }
            Ok(Reaction::Relit) => {
                changed.send(TowerChanged::Lighting);
            }
            Ok(Reaction::MotionChanged) => {
                changed.send(TowerChanged::Motion);
            }
            Ok(Reaction::LightPlanesChanged) => {
                info!(
                    "Window lights {}",
                    if controller.lights_on() { "on" } else { "off" }
                );
                changed.send(TowerChanged::LightPlanes);
            }
            Ok(Reaction::Debounced) => {
                debug!("Ignored lights toggle inside debounce window");
            }
            Ok(Reaction::Unchanged) => {}
            Err(e) => {
                warn!(
                    "Rejected {}; keeping current tower: {}",
                    command_name(command),
                    e
                );
            }
        }
    }
}

fn command_name(command: &TowerCommand) -> &'static str {
    match command {
        TowerCommand::ParameterChanged(_) => "parameter change",
        TowerCommand::ToggleLighting => "lighting toggle",
        TowerCommand::SetLighting(_) => "lighting change",
        TowerCommand::SetSeed(_) => "seed change",
        TowerCommand::SetMotion { .. } => "motion change",
        TowerCommand::SetVariant(_) => "variant change",
        TowerCommand::ToggleLightsOn { .. } => "lights toggle",
        TowerCommand::Regenerate => "regenerate",
    }
}
