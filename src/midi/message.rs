//! MIDI message model.
//!
//! Status constants, nibble-only channel-voice classification, and the
//! message payload handed to the component's subscriber.

/// Note On status byte (channel 0).
pub const NOTE_ON: u8 = 0x90;
/// Note Off status byte (channel 0).
pub const NOTE_OFF: u8 = 0x80;
/// Fixed velocity for locally generated gesture messages.
pub const GESTURE_VELOCITY: u8 = 0x7f;

/// Mask selecting the status nibble of a status byte.
const STATUS_MASK: u8 = 0xf0;

/// A MIDI message delivered to the component's subscriber.
///
/// `timestamp` (milliseconds) is `Some` only when the message is the
/// pass-through of an inbound message; gesture messages generated by key
/// presses carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiMessage {
    /// Raw message bytes, unmodified for pass-through.
    pub data: Vec<u8>,
    /// Delivery timestamp of the inbound original, if there was one.
    pub timestamp: Option<f64>,
}

impl MidiMessage {
    /// Wrap an inbound message for pass-through, bytes untouched.
    pub fn pass_through(data: &[u8], timestamp: f64) -> Self {
        Self {
            data: data.to_vec(),
            timestamp: Some(timestamp),
        }
    }

    /// Build a locally generated three-byte gesture message.
    pub fn gesture(status: u8, note: u8) -> Self {
        Self {
            data: vec![status, note, GESTURE_VELOCITY],
            timestamp: None,
        }
    }
}

/// Channel-voice classification of a raw message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelVoice {
    /// Status nibble 0x9 on any channel.
    NoteOn {
        /// MIDI note number from byte 1.
        note: u8,
    },
    /// Status nibble 0x8 on any channel.
    NoteOff {
        /// MIDI note number from byte 1.
        note: u8,
    },
}

/// Classify a raw message by its status nibble alone.
///
/// The channel nibble is ignored and velocity is never interpreted: a
/// Note On with velocity 0 stays a Note On here. Returns `None` for any
/// other status and for messages too short to carry a note byte; a missing
/// velocity byte is tolerated since velocity is never read.
pub fn classify(data: &[u8]) -> Option<ChannelVoice> {
    if data.len() < 2 {
        return None;
    }
    match data[0] & STATUS_MASK {
        NOTE_ON => Some(ChannelVoice::NoteOn { note: data[1] }),
        NOTE_OFF => Some(ChannelVoice::NoteOff { note: data[1] }),
        _ => None,
    }
}
