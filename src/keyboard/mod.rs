//! Keyboard module
//!
//! The piano roll component core: configuration, key layout generation,
//! the note-to-key registry, and the `PianoRoll` state owner.

pub mod config;
pub mod layout;
pub mod registry;
pub mod roll;

pub use config::{load_from_file, ConfigError, PianoRollConfig};
pub use layout::{build_keys, key_color, keyboard_width, KeyColor, KeyDescriptor};
pub use registry::{Key, KeyRegistry};
pub use roll::{MessageCallback, PianoRoll};
