//! The piano roll component.
//!
//! Owns the configuration, the key registry, and the outbound subscriber.
//! Inbound messages arrive through [`PianoRoll::send`]; key gestures arrive
//! through [`PianoRoll::press_key`] and [`PianoRoll::release_key`] and emit
//! Note On/Off messages of their own. Everything runs synchronously on the
//! caller's thread; there is no internal locking or queueing.

use crate::midi::message::{self, ChannelVoice, MidiMessage, NOTE_OFF, NOTE_ON};

use super::config::PianoRollConfig;
use super::layout;
use super::registry::KeyRegistry;

/// Subscriber invoked for pass-through and gesture messages.
pub type MessageCallback = Box<dyn FnMut(MidiMessage)>;

/// An interactive piano keyboard synchronized with MIDI note traffic.
///
/// # Example
/// ```
/// use piano_roll::keyboard::{PianoRoll, PianoRollConfig};
///
/// let mut roll = PianoRoll::new(PianoRollConfig::default().with_octaves(3))
///     .on_message(|message| println!("{:02x?}", message.data));
///
/// roll.send(&[0x90, 60, 100], 0.0); // middle C lights up
/// assert!(roll.registry().is_active(60));
/// ```
pub struct PianoRoll {
    config: PianoRollConfig,
    registry: KeyRegistry,
    on_message: Option<MessageCallback>,
}

impl PianoRoll {
    /// Build a keyboard from a configuration.
    ///
    /// Out-of-domain configuration values are replaced with their defaults
    /// rather than rejected (see [`PianoRollConfig::sanitized`]).
    pub fn new(config: PianoRollConfig) -> Self {
        let config = config.sanitized();
        let registry = KeyRegistry::new(&config);
        Self {
            config,
            registry,
            on_message: None,
        }
    }

    /// Build a keyboard with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PianoRollConfig::default())
    }

    /// Register the outbound message subscriber (builder form).
    pub fn on_message(mut self, callback: impl FnMut(MidiMessage) + 'static) -> Self {
        self.set_on_message(callback);
        self
    }

    /// Register the outbound message subscriber, replacing any previous one.
    pub fn set_on_message(&mut self, callback: impl FnMut(MidiMessage) + 'static) {
        self.on_message = Some(Box::new(callback));
    }

    pub fn config(&self) -> &PianoRollConfig {
        &self.config
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Total rendered width.
    pub fn width(&self) -> f32 {
        layout::keyboard_width(&self.config)
    }

    /// Total rendered height.
    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Deliver an inbound MIDI message.
    ///
    /// A Note On/Off status nibble toggles the matching key when its note is
    /// rendered; notes outside the keyboard and non-note messages leave
    /// visual state alone. With `pass_through` enabled the subscriber sees
    /// every message exactly once, bytes unchanged and timestamp attached,
    /// after any visual mutation, whatever the status byte was.
    pub fn send(&mut self, data: &[u8], timestamp: f64) {
        match message::classify(data) {
            Some(ChannelVoice::NoteOn { note }) => {
                self.registry.set_active(note, true);
            }
            Some(ChannelVoice::NoteOff { note }) => {
                self.registry.set_active(note, false);
            }
            None => {}
        }

        if self.config.pass_through {
            self.emit(MidiMessage::pass_through(data, timestamp));
        }
    }

    /// Pointer press on a rendered key.
    ///
    /// Activates the key immediately (local feedback, independent of any
    /// echoed message) and emits `[0x90, note, 0x7f]` with no timestamp.
    /// The outbound message goes straight to the subscriber; it does not
    /// re-enter [`Self::send`]. Unrendered notes are ignored.
    pub fn press_key(&mut self, note: u8) {
        if self.registry.set_active(note, true) {
            self.emit(MidiMessage::gesture(NOTE_ON, note));
        }
    }

    /// Pointer release on a rendered key: the symmetric Note Off.
    pub fn release_key(&mut self, note: u8) {
        if self.registry.set_active(note, false) {
            self.emit(MidiMessage::gesture(NOTE_OFF, note));
        }
    }

    /// Deactivate every key without tearing the component down.
    pub fn clear(&mut self) {
        self.registry.clear_active();
    }

    fn emit(&mut self, message: MidiMessage) {
        if let Some(callback) = self.on_message.as_mut() {
            callback(message);
        }
    }
}
