use bevy::prelude::*;
use bevy_egui::EguiContexts;

use tower::keybindings::KeyBindings;
use tower::TowerCommand;

use crate::egui_input_guard::egui_wants_keyboard;

/// Seconds a status message stays on screen.
pub const STATUS_SECONDS: f32 = 3.0;

/// Status message shown briefly on screen
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = STATUS_SECONDS;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}

/// Day/night shortcut.
pub fn day_night_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<TowerCommand>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if bindings.toggle_day_night.just_pressed(&keyboard) {
        commands.send(TowerCommand::ToggleLighting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_lifecycle() {
        let mut status = StatusMessage::default();
        assert!(!status.active());

        status.set("Screenshots not supported in browser", true);
        assert!(status.active());
        assert!(status.is_error);
        assert_eq!(status.timer, STATUS_SECONDS);

        status.timer = 0.0;
        assert!(!status.active());
    }
}
