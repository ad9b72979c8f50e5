//! Piano Roll Library
//!
//! An interactive piano keyboard widget: mirrors a stream of MIDI
//! channel-voice messages onto visual key state, and turns mouse presses on
//! the rendered keys back into outbound MIDI messages.

pub mod app;
pub mod keyboard;
pub mod midi;
pub mod widgets;
