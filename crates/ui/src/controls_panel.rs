//! "Skyscraper Controls" window.
//!
//! Form sliders edit a draft copy of the parameters and commit it as one
//! `ParameterChanged` command when the drag ends, so a drag regenerates the
//! tower once rather than every frame. Motion settings and the wireframe
//! toggle commit immediately; the seed commits on release and only relights.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::egui_input_guard::egui_wants_keyboard;
use tower::config::{
    FIN_COUNT_RANGE, FIN_DEPTH_RANGE, FLOORS_RANGE, FLOOR_HEIGHT_RANGE, ROTATION_SPEED_RANGE,
    SEED_RANGE, TAPER_RANGE, TWIST_RANGE,
};
use tower::keybindings::KeyBindings;
use tower::{BuildingParameters, TowerCommand, TowerController};

// =============================================================================
// Resources
// =============================================================================

/// Visibility of the controls window plus the parameters being edited.
#[derive(Resource)]
pub struct ControlsPanel {
    pub visible: bool,
    /// `None` when not editing; the window then mirrors the live parameters.
    draft: Option<BuildingParameters>,
}

impl Default for ControlsPanel {
    fn default() -> Self {
        Self {
            visible: true,
            draft: None,
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// A slider edit is finished when the drag ends, or when the value changed
/// without a drag (click, keyboard or typed value).
fn edit_finished(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

/// The command to send for a finished form edit, if anything changed.
pub fn form_command(
    draft: &BuildingParameters,
    committed: &BuildingParameters,
) -> Option<TowerCommand> {
    (draft != committed).then(|| TowerCommand::ParameterChanged(draft.clone()))
}

/// The command to send for a finished seed edit, if the seed changed.
pub fn seed_command(seed: u32, committed: &BuildingParameters) -> Option<TowerCommand> {
    (seed != committed.seed).then_some(TowerCommand::SetSeed(seed))
}

// =============================================================================
// Systems
// =============================================================================

/// Toggles the controls window.
pub fn controls_panel_keybind(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlsPanel>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if bindings.toggle_controls.just_pressed(&keyboard) {
        panel.visible = !panel.visible;
    }
}

/// Renders the controls window.
pub fn controls_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlsPanel>,
    controller: Res<TowerController>,
    mut commands: EventWriter<TowerCommand>,
) {
    if !panel.visible {
        return;
    }

    let committed = controller.params().clone();
    let mut draft = panel.draft.take().unwrap_or_else(|| committed.clone());
    let mut dragging = false;
    let mut open = true;

    egui::Window::new("Skyscraper Controls")
        .open(&mut open)
        .resizable(false)
        .default_width(280.0)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            // --- Form ---
            egui::CollapsingHeader::new("Form")
                .default_open(true)
                .show(ui, |ui| {
                    let responses = [
                        ui.add(egui::Slider::new(&mut draft.floors, FLOORS_RANGE).text("Floors")),
                        ui.add(
                            egui::Slider::new(&mut draft.floor_height, FLOOR_HEIGHT_RANGE)
                                .step_by(0.1)
                                .text("Floor Height"),
                        ),
                        ui.add(
                            egui::Slider::new(&mut draft.taper, TAPER_RANGE)
                                .step_by(0.01)
                                .text("Taper"),
                        ),
                        ui.add(
                            egui::Slider::new(&mut draft.total_twist_deg, TWIST_RANGE)
                                .step_by(1.0)
                                .suffix("°")
                                .text("Total Twist"),
                        ),
                        ui.add(
                            egui::Slider::new(&mut draft.fin_count, FIN_COUNT_RANGE).text("Fins"),
                        ),
                        ui.add(
                            egui::Slider::new(&mut draft.fin_depth, FIN_DEPTH_RANGE)
                                .step_by(0.05)
                                .text("Fin Depth"),
                        ),
                    ];
                    dragging |= responses.iter().any(egui::Response::dragged);
                    let finished = responses.iter().any(edit_finished);

                    let wireframe = ui.checkbox(&mut draft.wireframe, "Wireframe").changed();

                    if finished || wireframe {
                        if let Some(command) = form_command(
                            &BuildingParameters {
                                seed: committed.seed,
                                auto_rotate: committed.auto_rotate,
                                rotation_speed: committed.rotation_speed,
                                ..draft.clone()
                            },
                            &committed,
                        ) {
                            commands.send(command);
                        }
                    }
                });

            // --- Motion ---
            egui::CollapsingHeader::new("Motion")
                .default_open(true)
                .show(ui, |ui| {
                    let mut auto_rotate = committed.auto_rotate;
                    let mut rotation_speed = committed.rotation_speed;
                    let toggled = ui.checkbox(&mut auto_rotate, "Auto Rotate").changed();
                    let speed = ui.add(
                        egui::Slider::new(&mut rotation_speed, ROTATION_SPEED_RANGE)
                            .step_by(0.05)
                            .text("Rotate Speed"),
                    );
                    if toggled || speed.changed() {
                        commands.send(TowerCommand::SetMotion {
                            auto_rotate,
                            rotation_speed,
                        });
                    }
                    draft.auto_rotate = auto_rotate;
                    draft.rotation_speed = rotation_speed;
                });

            ui.separator();

            // --- Seed ---
            let seed = ui.add(egui::Slider::new(&mut draft.seed, SEED_RANGE).text("Random Seed"));
            dragging |= seed.dragged();
            if edit_finished(&seed) {
                if let Some(command) = seed_command(draft.seed, &committed) {
                    commands.send(command);
                }
            }

            ui.separator();
            if ui.button("Regenerate").clicked() {
                commands.send(TowerCommand::Regenerate);
            }
        });

    // Keep the draft only while a drag is in progress; otherwise mirror the
    // live parameters, which also reverts rejected edits.
    panel.draft = dragging.then_some(draft);

    if !open {
        panel.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_command_only_when_changed() {
        let committed = BuildingParameters::default();
        assert!(form_command(&committed, &committed).is_none());

        let draft = BuildingParameters {
            floors: 40,
            ..committed.clone()
        };
        match form_command(&draft, &committed) {
            Some(TowerCommand::ParameterChanged(params)) => assert_eq!(params.floors, 40),
            other => panic!("expected ParameterChanged, got: {other:?}"),
        }
    }

    #[test]
    fn test_seed_command() {
        let committed = BuildingParameters::default();
        assert!(seed_command(committed.seed, &committed).is_none());
        assert_eq!(
            seed_command(512, &committed),
            Some(TowerCommand::SetSeed(512))
        );
    }

    #[test]
    fn test_panel_starts_visible_without_draft() {
        let panel = ControlsPanel::default();
        assert!(panel.visible);
        assert!(panel.draft.is_none());
    }
}
