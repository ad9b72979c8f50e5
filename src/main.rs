//! Piano Roll - an interactive MIDI piano keyboard
//!
//! Entry point for the demo application. Pass a JSON configuration file
//! path as the first argument to override the keyboard layout.

use std::path::Path;

use eframe::egui;

use piano_roll::app::RollApp;
use piano_roll::keyboard::{self, PianoRollConfig};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match keyboard::load_from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("failed to load config {}: {}, using defaults", path, e);
                PianoRollConfig::default()
            }
        },
        // Roomy three-octave keyboard when no config is given
        None => PianoRollConfig::default()
            .with_octaves(3)
            .with_height(100.0)
            .with_key_width(23.0),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 320.0])
            .with_title("Piano Roll"),
        ..Default::default()
    };

    eframe::run_native(
        "Piano Roll",
        options,
        Box::new(move |_cc| Ok(Box::new(RollApp::new(config)))),
    )
}
