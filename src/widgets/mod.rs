//! Widgets module
//!
//! egui presentation layer for the keyboard component.

pub mod piano_roll;

pub use piano_roll::{piano_roll, PianoRollStyle};
