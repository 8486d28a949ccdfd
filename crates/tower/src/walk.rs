//! Walk-mode window lights.
//!
//! In walk mode the tower carries extra emissive light planes in front of the
//! glazing. A debounced switch turns them all on or off; the planes are found
//! by their sentinel material color.

use crate::config::LIGHTS_TOGGLE_DEBOUNCE_SECS;
use crate::palette::LIGHT_PLANE_SENTINEL;
use crate::primitives::TowerSubtree;

/// Debounced on/off switch for the walk-mode window lights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightsSwitch {
    lights_on: bool,
    last_toggle_secs: Option<f64>,
}

impl LightsSwitch {
    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    /// Flip the switch unless the previous flip happened less than the
    /// debounce window ago. Returns whether the flip was accepted.
    pub fn try_toggle(&mut self, now_secs: f64) -> bool {
        if let Some(last) = self.last_toggle_secs {
            if now_secs - last < LIGHTS_TOGGLE_DEBOUNCE_SECS {
                return false;
            }
        }
        self.lights_on = !self.lights_on;
        self.last_toggle_secs = Some(now_secs);
        true
    }
}

/// Show or hide every primitive whose material carries the light-plane
/// sentinel color. Returns the number of primitives whose visibility changed.
pub fn set_light_planes_visible(subtree: &mut TowerSubtree, visible: bool) -> usize {
    let mut changed = 0;
    for primitive in subtree.primitives_mut() {
        let is_light_plane = primitive
            .material
            .as_ref()
            .is_some_and(|m| m.base_color == LIGHT_PLANE_SENTINEL);
        if is_light_plane && primitive.visible != visible {
            primitive.visible = visible;
            changed += 1;
        }
    }
    changed
}
