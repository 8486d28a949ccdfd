//! Egui input guard: keeps pointer and keyboard input aimed at the controls
//! panel from also driving the camera or scene shortcuts.

use bevy_egui::EguiContexts;

/// Returns `true` when the cursor is over an egui window or egui is handling
/// a drag. Camera systems skip their input while this holds.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Returns `true` while a text field or slider edit has keyboard focus.
#[inline]
pub fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts.ctx_mut().wants_keyboard_input()
}
