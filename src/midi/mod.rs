//! MIDI module
//!
//! Raw channel-voice message handling and hardware MIDI input.
//! The message model is what the keyboard component consumes and emits;
//! the input engine is the demo application's bridge to real devices.

pub mod input;
pub mod message;

pub use input::{MidiDeviceInfo, MidiInputEngine, MidiInputError, RawMidiMessage};
pub use message::{classify, ChannelVoice, MidiMessage, GESTURE_VELOCITY, NOTE_OFF, NOTE_ON};
