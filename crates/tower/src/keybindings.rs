//! Keyboard shortcuts.
//!
//! Systems read keys from the `KeyBindings` resource instead of hardcoding
//! `KeyCode` values.

use bevy::prelude::*;

/// Every action that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindableAction {
    ToggleDayNight,
    Screenshot,
    ToggleWalkMode,
    ToggleLights,
    ToggleControls,
    WalkForward,
    WalkBackward,
    WalkLeft,
    WalkRight,
    Sprint,
}

impl BindableAction {
    /// Human-readable label for the help line in the controls panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::ToggleDayNight => "Day / Night",
            Self::Screenshot => "Screenshot",
            Self::ToggleWalkMode => "Walk Mode",
            Self::ToggleLights => "Window Lights",
            Self::ToggleControls => "Controls Panel",
            Self::WalkForward => "Walk Forward",
            Self::WalkBackward => "Walk Backward",
            Self::WalkLeft => "Strafe Left",
            Self::WalkRight => "Strafe Right",
            Self::Sprint => "Sprint",
        }
    }

    pub const ALL: &'static [BindableAction] = &[
        Self::ToggleDayNight,
        Self::Screenshot,
        Self::ToggleWalkMode,
        Self::ToggleLights,
        Self::ToggleControls,
        Self::WalkForward,
        Self::WalkBackward,
        Self::WalkLeft,
        Self::WalkRight,
        Self::Sprint,
    ];
}

/// A single key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
}

impl KeyBinding {
    pub const fn simple(key: KeyCode) -> Self {
        Self { key }
    }

    pub fn just_pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.just_pressed(self.key)
    }

    /// Held check for continuous actions like walking.
    pub fn pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.pressed(self.key)
    }

    pub fn display_label(self) -> String {
        let key = format!("{:?}", self.key);
        key.strip_prefix("Key")
            .or_else(|| key.strip_prefix("Digit"))
            .unwrap_or(&key)
            .to_string()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub toggle_day_night: KeyBinding,
    pub screenshot: KeyBinding,
    pub toggle_walk_mode: KeyBinding,
    pub toggle_lights: KeyBinding,
    pub toggle_controls: KeyBinding,
    pub walk_forward: KeyBinding,
    pub walk_backward: KeyBinding,
    pub walk_left: KeyBinding,
    pub walk_right: KeyBinding,
    pub sprint: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_day_night: KeyBinding::simple(KeyCode::KeyN),
            screenshot: KeyBinding::simple(KeyCode::F12),
            toggle_walk_mode: KeyBinding::simple(KeyCode::KeyV),
            toggle_lights: KeyBinding::simple(KeyCode::KeyL),
            toggle_controls: KeyBinding::simple(KeyCode::KeyH),
            walk_forward: KeyBinding::simple(KeyCode::KeyW),
            walk_backward: KeyBinding::simple(KeyCode::KeyS),
            walk_left: KeyBinding::simple(KeyCode::KeyA),
            walk_right: KeyBinding::simple(KeyCode::KeyD),
            sprint: KeyBinding::simple(KeyCode::ShiftLeft),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, action: BindableAction) -> KeyBinding {
        match action {
            BindableAction::ToggleDayNight => self.toggle_day_night,
            BindableAction::Screenshot => self.screenshot,
            BindableAction::ToggleWalkMode => self.toggle_walk_mode,
            BindableAction::ToggleLights => self.toggle_lights,
            BindableAction::ToggleControls => self.toggle_controls,
            BindableAction::WalkForward => self.walk_forward,
            BindableAction::WalkBackward => self.walk_backward,
            BindableAction::WalkLeft => self.walk_left,
            BindableAction::WalkRight => self.walk_right,
            BindableAction::Sprint => self.sprint,
        }
    }

    /// Pairs of actions bound to the same key.
    pub fn conflicts(&self) -> Vec<(BindableAction, BindableAction)> {
        let mut out = Vec::new();
        for (i, &a) in BindableAction::ALL.iter().enumerate() {
            for &b in &BindableAction::ALL[i + 1..] {
                if self.get(a) == self.get(b) {
                    out.push((a, b));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_have_no_conflicts() {
        assert!(KeyBindings::default().conflicts().is_empty());
    }

    #[test]
    fn test_conflict_detected() {
        let bindings = KeyBindings {
            toggle_lights: KeyBinding::simple(KeyCode::KeyN),
            ..Default::default()
        };
        let conflicts = bindings.conflicts();
        assert_eq!(
            conflicts,
            vec![(BindableAction::ToggleDayNight, BindableAction::ToggleLights)]
        );
    }

    #[test]
    fn test_display_label() {
        assert_eq!(KeyBinding::simple(KeyCode::KeyL).display_label(), "L");
        assert_eq!(KeyBinding::simple(KeyCode::Digit3).display_label(), "3");
        assert_eq!(KeyBinding::simple(KeyCode::F12).display_label(), "F12");
    }

    #[test]
    fn test_just_pressed_and_held() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        let forward = KeyBindings::default().walk_forward;
        assert!(forward.just_pressed(&keys));
        assert!(forward.pressed(&keys));

        keys.clear();
        assert!(!forward.just_pressed(&keys), "got: just pressed after clear");
        assert!(forward.pressed(&keys));
        assert!(!KeyBinding::simple(KeyCode::KeyN).pressed(&keys));
    }
}
