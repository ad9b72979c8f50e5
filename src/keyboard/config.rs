//! Piano roll configuration.
//!
//! Construction-time options with permissive defaults: out-of-domain values
//! are replaced with their documented defaults rather than rejected, so
//! building a keyboard never fails.

use serde::{Deserialize, Serialize};

/// Default keyboard height in points.
pub const DEFAULT_HEIGHT: f32 = 50.0;
/// Default white-key width in points.
pub const DEFAULT_KEY_WIDTH: f32 = 12.0;
/// Default first rendered note: C3.
pub const DEFAULT_START_NOTE: u8 = 48;
/// Default number of rendered octaves.
pub const DEFAULT_OCTAVES: u8 = 2;

/// Highest valid MIDI note number.
const MAX_NOTE: u8 = 127;

/// Configuration for a [`super::PianoRoll`].
///
/// Immutable once the keyboard is built; changing the note range means
/// constructing a new keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoRollConfig {
    /// Keyboard height.
    pub height: f32,
    /// White key width. Black key dimensions derive from this and `height`.
    pub key_width: f32,
    /// MIDI note number of the first (leftmost) key.
    pub start_note: u8,
    /// Number of 12-semitone spans rendered. Zero renders nothing.
    pub octaves: u8,
    /// Forward every inbound message to the subscriber after visual handling.
    pub pass_through: bool,
}

impl Default for PianoRollConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            key_width: DEFAULT_KEY_WIDTH,
            start_note: DEFAULT_START_NOTE,
            octaves: DEFAULT_OCTAVES,
            pass_through: true,
        }
    }
}

impl PianoRollConfig {
    /// Set the keyboard height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the white key width.
    pub fn with_key_width(mut self, key_width: f32) -> Self {
        self.key_width = key_width;
        self
    }

    /// Set the first rendered note.
    pub fn with_start_note(mut self, start_note: u8) -> Self {
        self.start_note = start_note;
        self
    }

    /// Set the number of rendered octaves.
    pub fn with_octaves(mut self, octaves: u8) -> Self {
        self.octaves = octaves;
        self
    }

    /// Enable or disable pass-through of inbound messages.
    pub fn with_pass_through(mut self, pass_through: bool) -> Self {
        self.pass_through = pass_through;
        self
    }

    /// Replace out-of-domain values with the documented defaults.
    ///
    /// Non-finite or non-positive dimensions fall back to their defaults,
    /// a start note above 127 falls back to C3, and the octave count is
    /// clamped so the rendered range stays inside the MIDI note space.
    /// `octaves == 0` is left alone: an empty keyboard is legal.
    pub fn sanitized(mut self) -> Self {
        if !self.height.is_finite() || self.height <= 0.0 {
            log::warn!("invalid height {}, using {}", self.height, DEFAULT_HEIGHT);
            self.height = DEFAULT_HEIGHT;
        }
        if !self.key_width.is_finite() || self.key_width <= 0.0 {
            log::warn!("invalid key width {}, using {}", self.key_width, DEFAULT_KEY_WIDTH);
            self.key_width = DEFAULT_KEY_WIDTH;
        }
        if self.start_note > MAX_NOTE {
            log::warn!("start note {} above 127, using {}", self.start_note, DEFAULT_START_NOTE);
            self.start_note = DEFAULT_START_NOTE;
        }
        let max_octaves = ((MAX_NOTE as u16 + 1) - self.start_note as u16) / 12;
        if self.octaves as u16 > max_octaves {
            log::warn!(
                "octave count {} runs past note 127 from start note {}, clamping to {}",
                self.octaves,
                self.start_note,
                max_octaves
            );
            self.octaves = max_octaves as u8;
        }
        self
    }
}

/// Error loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    SerializationError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "File error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(e) => Some(e),
            Self::SerializationError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e)
    }
}

/// Load a configuration from a JSON file.
///
/// Missing fields take their defaults; out-of-domain values are sanitized
/// the same way as programmatic construction.
pub fn load_from_file(path: &std::path::Path) -> Result<PianoRollConfig, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    let config: PianoRollConfig = serde_json::from_str(&json)?;
    Ok(config.sanitized())
}
