//! Building parameters: the knobs that fully determine a generated tower.
//!
//! A `BuildingParameters` value is immutable for the duration of a generation
//! pass. The controls panel edits a draft copy and submits it as a
//! `TowerCommand::ParameterChanged`; the controller decides whether the change
//! needs a full regeneration or only an in-place update.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::{
    FIN_COUNT_RANGE, FIN_DEPTH_RANGE, FLOORS_RANGE, FLOOR_HEIGHT_RANGE, MAX_FOOTPRINT,
    ROTATION_SPEED_RANGE, SEED_RANGE, TAPER_RANGE, TWIST_RANGE,
};
use crate::error::TowerError;

/// All inputs of the tower generator plus the cosmetic motion settings that
/// ride along in the same control panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingParameters {
    /// Number of floors (at least 1).
    pub floors: u32,
    /// Floor-to-floor height in meters.
    pub floor_height: f32,
    /// Bottom radius of the per-floor core cylinder.
    pub core_radius: f32,
    /// Footprint width of the ground floor.
    pub base_width: f32,
    /// Footprint depth of the ground floor.
    pub base_depth: f32,
    /// Fraction of the base width lost by the top floor, in `[0, 1)`.
    pub taper: f32,
    /// Rotation of the top floor relative to the ground floor, in degrees.
    pub total_twist_deg: f32,
    /// Number of vertical fins around the tower.
    pub fin_count: u32,
    /// Radial depth of each fin.
    pub fin_depth: f32,
    /// Render floor slabs as wireframes.
    pub wireframe: bool,
    /// Seed for the window-lighting pattern.
    pub seed: u32,
    /// Orbit camera spins around the tower on its own.
    pub auto_rotate: bool,
    /// Auto-rotate speed (1.0 = one revolution per minute).
    pub rotation_speed: f32,
}

impl Default for BuildingParameters {
    fn default() -> Self {
        Self {
            floors: 23,
            floor_height: 3.6,
            core_radius: 4.4,
            base_width: 14.0,
            base_depth: 10.0,
            taper: 0.38,
            total_twist_deg: 220.0,
            fin_count: 6,
            fin_depth: 1.0,
            wireframe: false,
            seed: 1,
            auto_rotate: true,
            rotation_speed: 0.4,
        }
    }
}

/// What a parameter change requires from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// Nothing observable changed.
    None,
    /// Only the camera motion settings changed.
    Motion,
    /// Only the lighting seed changed; facades are re-lit in place.
    Lighting,
    /// Geometry changed; the tower must be regenerated.
    Geometry,
}

impl BuildingParameters {
    /// Total height of all floors, excluding the crown.
    pub fn total_height(&self) -> f32 {
        self.floors as f32 * self.floor_height
    }

    /// Slab thickness derived from the floor height.
    pub fn slab_height(&self) -> f32 {
        self.floor_height * crate::config::SLAB_HEIGHT_RATIO
    }

    /// Vertical clearance between two slabs.
    pub fn floor_clearance(&self) -> f32 {
        self.floor_height - self.slab_height()
    }

    /// Interpolation parameter for floor `index`: 0 at the bottom floor, 1 at
    /// the top floor, and 0 for every floor of a single-floor tower.
    pub fn floor_t(&self, index: u32) -> f32 {
        let denominator = self.floors.saturating_sub(1).max(1);
        (index as f32 / denominator as f32).clamp(0.0, 1.0)
    }

    /// Twist of floor `index` in radians.
    pub fn floor_twist(&self, index: u32) -> f32 {
        (self.total_twist_deg * self.floor_t(index)).to_radians()
    }

    /// Check that the generator can build these parameters.
    ///
    /// Validation runs before any teardown so that a rejected rebuild leaves
    /// the current tower on screen.
    pub fn validate(&self) -> Result<(), TowerError> {
        // A single-floor tower is valid even though the slider starts at 10.
        if self.floors == 0 || self.floors > *FLOORS_RANGE.end() {
            return Err(TowerError::invalid(
                "floors",
                format!(
                    "must be in [1, {}], got {}",
                    FLOORS_RANGE.end(),
                    self.floors
                ),
            ));
        }
        check_range("floor_height", self.floor_height, &FLOOR_HEIGHT_RANGE)?;
        check_range("taper", self.taper, &TAPER_RANGE)?;
        check_range("total_twist_deg", self.total_twist_deg, &TWIST_RANGE)?;
        check_range("fin_depth", self.fin_depth, &FIN_DEPTH_RANGE)?;
        check_range("rotation_speed", self.rotation_speed, &ROTATION_SPEED_RANGE)?;
        check_range("core_radius", self.core_radius, &(0.0..=MAX_FOOTPRINT))?;
        check_positive("base_width", self.base_width)?;
        check_positive("base_depth", self.base_depth)?;
        check_range("base_width", self.base_width, &(0.0..=MAX_FOOTPRINT))?;
        check_range("base_depth", self.base_depth, &(0.0..=MAX_FOOTPRINT))?;
        if !FIN_COUNT_RANGE.contains(&self.fin_count) {
            return Err(TowerError::invalid(
                "fin_count",
                format!("must be in {FIN_COUNT_RANGE:?}, got {}", self.fin_count),
            ));
        }
        if !SEED_RANGE.contains(&self.seed) {
            return Err(TowerError::invalid(
                "seed",
                format!("must be in {SEED_RANGE:?}, got {}", self.seed),
            ));
        }
        Ok(())
    }

    /// Classify the difference between `self` (current) and `next`.
    pub fn change_scope(&self, next: &BuildingParameters) -> ChangeScope {
        let geometry_changed = self.floors != next.floors
            || self.floor_height != next.floor_height
            || self.core_radius != next.core_radius
            || self.base_width != next.base_width
            || self.base_depth != next.base_depth
            || self.taper != next.taper
            || self.total_twist_deg != next.total_twist_deg
            || self.fin_count != next.fin_count
            || self.fin_depth != next.fin_depth
            || self.wireframe != next.wireframe;
        if geometry_changed {
            ChangeScope::Geometry
        } else if self.seed != next.seed {
            ChangeScope::Lighting
        } else if self.auto_rotate != next.auto_rotate
            || self.rotation_speed != next.rotation_speed
        {
            ChangeScope::Motion
        } else {
            ChangeScope::None
        }
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), TowerError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TowerError::invalid(
            field,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<(), TowerError> {
    if !range.contains(&value) {
        return Err(TowerError::invalid(
            field,
            format!("must be in {range:?}, got {value}"),
        ));
    }
    Ok(())
}
