//! One-shot capture mode for CI and docs: `SKYLINE_SCREENSHOT=<path>` renders
//! a fixed number of frames, saves the primary window to `<path>` and exits.

use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

const SCREENSHOT_ENV_VAR: &str = "SKYLINE_SCREENSHOT";
/// Frames rendered before the capture so the first tower and the tonemapping
/// LUTs are in place.
const WARMUP_FRAMES: u32 = 120;
/// Frames to wait after the capture for the readback to hit the disk.
const SAVE_FRAMES: u32 = 30;

#[derive(Resource)]
struct ScreenshotCapture {
    frame: u32,
    path: String,
}

pub fn install_from_env(app: &mut App) {
    if let Ok(path) = std::env::var(SCREENSHOT_ENV_VAR) {
        app.insert_resource(ScreenshotCapture { frame: 0, path })
            .add_systems(Update, drive_screenshot);
    }
}

fn drive_screenshot(
    mut commands: Commands,
    mut capture: ResMut<ScreenshotCapture>,
    mut exit: EventWriter<AppExit>,
) {
    capture.frame += 1;

    if capture.frame == WARMUP_FRAMES {
        info!("Capturing screenshot to {}", capture.path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(capture.path.clone()));
    } else if capture.frame >= WARMUP_FRAMES + SAVE_FRAMES {
        exit.send(AppExit::Success);
    }
}
