use bevy::prelude::*;
use bevy_egui::EguiContexts;

#[cfg(not(target_arch = "wasm32"))]
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use tower::keybindings::KeyBindings;

use crate::egui_input_guard::egui_wants_keyboard;
use crate::input::StatusMessage;

pub const SCREENSHOT_DIR: &str = "screenshots";

/// Ask for a capture of the primary window. Sent by the screenshot key and
/// the HUD button.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ScreenshotRequest;

pub struct ScreenshotPlugin;

impl Plugin for ScreenshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ScreenshotRequest>().add_systems(
            Update,
            (screenshot_key, handle_screenshot_requests).chain(),
        );
    }
}

fn screenshot_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut contexts: EguiContexts,
    mut requests: EventWriter<ScreenshotRequest>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if bindings.screenshot.just_pressed(&keyboard) {
        requests.send(ScreenshotRequest);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn handle_screenshot_requests(
    mut commands: Commands,
    mut requests: EventReader<ScreenshotRequest>,
    mut status: ResMut<StatusMessage>,
) {
    // Several requests in one frame produce one capture.
    if requests.read().count() == 0 {
        return;
    }

    if let Err(e) = std::fs::create_dir_all(SCREENSHOT_DIR) {
        error!("Failed to create {}: {}", SCREENSHOT_DIR, e);
        status.set("Failed to create screenshots directory", true);
        return;
    }

    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let filename = screenshot_filename(secs);

    info!("Saving screenshot to {}", filename);
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(filename.clone()));

    status.set(format!("Screenshot saved: {}", filename), false);
}

#[cfg(target_arch = "wasm32")]
fn handle_screenshot_requests(
    mut requests: EventReader<ScreenshotRequest>,
    mut status: ResMut<StatusMessage>,
) {
    if requests.read().count() > 0 {
        status.set("Screenshots not supported in browser", true);
    }
}

/// `screenshots/skyscraper23-<UTC timestamp>.png` for the given epoch second.
pub fn screenshot_filename(epoch: u64) -> String {
    let (year, month, day, hour, minute, second) = epoch_to_datetime(epoch);
    format!(
        "{}/skyscraper23-{:04}-{:02}-{:02}_{:02}-{:02}-{:02}.png",
        SCREENSHOT_DIR, year, month, day, hour, minute, second
    )
}

/// Convert Unix epoch seconds to (year, month, day, hour, minute, second) in UTC.
fn epoch_to_datetime(epoch: u64) -> (u64, u64, u64, u64, u64, u64) {
    let second = epoch % 60;
    let minute = (epoch / 60) % 60;
    let hour = (epoch / 3600) % 24;

    let mut days = epoch / 86400;

    let mut year = 1970u64;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let days_in_months: [u64; 12] = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut month = 1u64;
    for &dim in &days_in_months {
        if days < dim {
            break;
        }
        days -= dim;
        month += 1;
    }

    (year, month, days + 1, hour, minute, second)
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
