//! Demo application.
//!
//! Hosts the piano roll widget in an eframe window, wires a hardware MIDI
//! input into [`PianoRoll::send`], and shows the messages the component
//! emits: pass-through of inbound traffic and the Note On/Off pairs
//! generated by clicking keys.

use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;
use rtrb::Consumer;

use crate::keyboard::{PianoRoll, PianoRollConfig};
use crate::midi::input::{MidiInputEngine, MidiInputError, RawMidiMessage};
use crate::midi::message::MidiMessage;
use crate::widgets::{piano_roll, PianoRollStyle};

/// How many monitor lines to keep.
const MONITOR_CAPACITY: usize = 24;

/// Main application state for the demo.
pub struct RollApp {
    /// The keyboard component.
    roll: PianoRoll,
    /// Widget style.
    style: PianoRollStyle,
    /// Messages emitted by the component, drained each frame.
    message_rx: mpsc::Receiver<MidiMessage>,
    /// MIDI input engine, or the error that prevented creating it.
    midi_input: Result<MidiInputEngine, MidiInputError>,
    /// Consumer end of the raw message ring buffer.
    midi_consumer: Option<Consumer<RawMidiMessage>>,
    /// Recent message lines for the monitor panel.
    monitor: Vec<String>,
}

impl RollApp {
    /// Create the app around a keyboard configuration.
    pub fn new(config: PianoRollConfig) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        let roll = PianoRoll::new(config).on_message(move |message| {
            let _ = message_tx.send(message);
        });

        let (midi_input, midi_consumer) = match MidiInputEngine::new() {
            Ok((engine, consumer)) => (Ok(engine), Some(consumer)),
            Err(e) => {
                log::warn!("MIDI input unavailable: {}", e);
                (Err(e), None)
            }
        };

        Self {
            roll,
            style: PianoRollStyle::midi(),
            message_rx,
            midi_input,
            midi_consumer,
            monitor: Vec::new(),
        }
    }

    /// Feed everything the device delivered since last frame into the roll.
    fn drain_midi(&mut self) {
        if let Some(consumer) = self.midi_consumer.as_mut() {
            while let Ok(message) = consumer.pop() {
                self.roll.send(message.bytes(), message.timestamp_ms());
            }
        }
    }

    /// Collect emitted messages into the monitor.
    fn drain_monitor(&mut self) {
        while let Ok(message) = self.message_rx.try_recv() {
            self.monitor.push(format_message(&message));
            if self.monitor.len() > MONITOR_CAPACITY {
                self.monitor.remove(0);
            }
        }
    }

    /// Draw the device picker and keyboard controls.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &mut self.midi_input {
                Ok(engine) => {
                    let devices = engine.enumerate_devices();
                    let selected = engine.selected_device();
                    let label = selected
                        .and_then(|i| devices.get(i))
                        .map(|d| d.name.clone())
                        .unwrap_or_else(|| "No MIDI input".to_string());

                    let mut connect_to = None;
                    egui::ComboBox::from_label("MIDI input")
                        .selected_text(label)
                        .show_ui(ui, |ui| {
                            for device in &devices {
                                if ui
                                    .selectable_label(selected == Some(device.index), &device.name)
                                    .clicked()
                                {
                                    connect_to = Some(device.index);
                                }
                            }
                        });
                    if let Some(index) = connect_to {
                        if let Err(e) = engine.connect(index) {
                            log::warn!("MIDI connect failed: {}", e);
                        }
                    }

                    if engine.is_connected() && ui.button("Disconnect").clicked() {
                        engine.disconnect();
                    }
                }
                Err(message) => {
                    ui.label(format!("MIDI input unavailable: {}", message));
                }
            }

            ui.separator();

            if ui.button("Clear").clicked() {
                self.roll.clear();
            }
        });
    }

    /// Draw the scrolling message monitor.
    fn draw_monitor(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.monitor {
                    ui.monospace(line);
                }
            });
    }
}

impl eframe::App for RollApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_midi();
        self.drain_monitor();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_toolbar(ui);
            ui.separator();
            piano_roll(ui, &mut self.roll, &self.style);
            ui.separator();
            self.draw_monitor(ui);
        });

        // Keep draining the ring buffer while no UI events arrive
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

/// One monitor line per message; gesture messages have no timestamp.
fn format_message(message: &MidiMessage) -> String {
    match message.timestamp {
        Some(timestamp) => format!("in  {:02x?} @ {:.1} ms", message.data, timestamp),
        None => format!("out {:02x?}", message.data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pass_through_line() {
        let line = format_message(&MidiMessage::pass_through(&[0x90, 60, 100], 1000.0));
        assert!(line.starts_with("in"));
        assert!(line.contains("1000.0 ms"));
    }

    #[test]
    fn test_format_gesture_line() {
        let line = format_message(&MidiMessage::gesture(0x80, 60));
        assert!(line.starts_with("out"));
        assert!(!line.contains("ms"));
    }
}
