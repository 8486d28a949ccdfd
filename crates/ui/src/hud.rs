//! Top-left HUD: lighting and screenshot buttons, the status line and a
//! short key reference.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::input::StatusMessage;
use rendering::screenshot::ScreenshotRequest;
use rendering::walk::WalkState;
use tower::keybindings::{BindableAction, KeyBindings};
use tower::{TowerCommand, TowerController};

use crate::theme::{ERROR_TEXT, STATUS_TEXT};

/// Actions listed in the help line for each camera mode.
const ORBIT_HELP: &[BindableAction] = &[
    BindableAction::ToggleDayNight,
    BindableAction::ToggleWalkMode,
    BindableAction::ToggleControls,
    BindableAction::Screenshot,
];
const WALK_HELP: &[BindableAction] = &[
    BindableAction::ToggleLights,
    BindableAction::Sprint,
    BindableAction::ToggleWalkMode,
    BindableAction::Screenshot,
];

/// `"N: Day / Night · V: Walk Mode"` style reference for the given actions.
pub fn key_help(bindings: &KeyBindings, actions: &[BindableAction]) -> String {
    actions
        .iter()
        .map(|&action| format!("{}: {}", bindings.get(action).display_label(), action.label()))
        .collect::<Vec<_>>()
        .join("  ·  ")
}

/// Label of the lighting button: names the mode a click switches to.
pub fn lighting_button_label(is_day: bool) -> &'static str {
    if is_day {
        "Switch to Night"
    } else {
        "Switch to Day"
    }
}

pub fn hud_ui(
    mut contexts: EguiContexts,
    controller: Res<TowerController>,
    status: Res<StatusMessage>,
    bindings: Res<KeyBindings>,
    walk: Res<WalkState>,
    mut commands: EventWriter<TowerCommand>,
    mut screenshots: EventWriter<ScreenshotRequest>,
) {
    egui::Window::new("hud")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(8.0, 8.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(lighting_button_label(controller.lighting().is_day()))
                    .clicked()
                {
                    commands.send(TowerCommand::ToggleLighting);
                }
                if ui.button("Screenshot").clicked() {
                    screenshots.send(ScreenshotRequest);
                }
            });

            if walk.active {
                let lights = if controller.lights_on() { "on" } else { "off" };
                ui.label(format!("Walk mode · window lights {lights}"));
            }

            if status.active() {
                let color = if status.is_error { ERROR_TEXT } else { STATUS_TEXT };
                ui.colored_label(color, status.text.as_str());
            }

            let help = if walk.active { WALK_HELP } else { ORBIT_HELP };
            ui.small(key_help(&bindings, help));
        });
}
