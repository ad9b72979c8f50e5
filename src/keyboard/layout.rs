//! Key layout generation.
//!
//! Computes the geometry of every key for a configured note range. White
//! keys consume horizontal slots; black keys straddle the boundary between
//! the neighboring whites and consume none, so the fixed octave pattern
//! alone encodes which whites carry a black key.

use super::config::PianoRollConfig;

/// Width of a black key relative to a white key.
pub const BLACK_KEY_SIZE: f32 = 0.6;
/// Height of a black key relative to the keyboard height.
pub const BLACK_KEY_HEIGHT: f32 = 0.5;
/// White keys per octave.
pub const WHITE_KEYS_PER_OCTAVE: usize = 7;
/// Semitones per octave.
pub const SEMITONES_PER_OCTAVE: usize = 12;

/// Key color, selecting one of the two key construction shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    /// Full-height key occupying a horizontal slot.
    White,
    /// Short, narrow key overlapping the slot boundary to its left.
    Black,
}

/// Octave layout: C C# D D# E F F# G G# A A# B.
const OCTAVE_PATTERN: [KeyColor; SEMITONES_PER_OCTAVE] = [
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
    KeyColor::Black,
    KeyColor::White,
];

/// Color of a MIDI note number per the octave pattern.
pub fn key_color(note: u8) -> KeyColor {
    OCTAVE_PATTERN[note as usize % SEMITONES_PER_OCTAVE]
}

/// Geometry and identity of a single key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyDescriptor {
    /// MIDI note number this key represents.
    pub note: u8,
    /// White or black, per the octave pattern.
    pub color: KeyColor,
    /// Left edge, relative to the keyboard origin.
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Total keyboard width: seven white-key slots per octave.
pub fn keyboard_width(config: &PianoRollConfig) -> f32 {
    config.octaves as f32 * WHITE_KEYS_PER_OCTAVE as f32 * config.key_width
}

/// Build the ordered key sequence for a configuration.
///
/// One descriptor per note in `start_note .. start_note + 12 * octaves`,
/// in note order. Expects a sanitized configuration; zero octaves yields an
/// empty sequence.
pub fn build_keys(config: &PianoRollConfig) -> Vec<KeyDescriptor> {
    let count = config.octaves as usize * SEMITONES_PER_OCTAVE;
    let mut keys = Vec::with_capacity(count);
    let mut x = 0.0;

    for offset in 0..count {
        let note = config.start_note + offset as u8;
        match key_color(note) {
            KeyColor::White => {
                keys.push(KeyDescriptor {
                    note,
                    color: KeyColor::White,
                    x,
                    width: config.key_width,
                    height: config.height,
                });
                x += config.key_width;
            }
            KeyColor::Black => {
                let width = BLACK_KEY_SIZE * config.key_width;
                keys.push(KeyDescriptor {
                    note,
                    color: KeyColor::Black,
                    x: x - width / 2.0,
                    width,
                    height: BLACK_KEY_HEIGHT * config.height,
                });
            }
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_octave() -> PianoRollConfig {
        PianoRollConfig::default().with_octaves(1)
    }

    #[test]
    fn test_key_counts() {
        for octaves in 1..=6u8 {
            let keys = build_keys(&PianoRollConfig::default().with_octaves(octaves));
            assert_eq!(keys.len(), 12 * octaves as usize);
            let whites = keys.iter().filter(|k| k.color == KeyColor::White).count();
            assert_eq!(whites, 7 * octaves as usize);
        }
    }

    #[test]
    fn test_octave_pattern() {
        let keys = build_keys(&one_octave());
        let expected = [
            KeyColor::White,
            KeyColor::Black,
            KeyColor::White,
            KeyColor::Black,
            KeyColor::White,
            KeyColor::White,
            KeyColor::Black,
            KeyColor::White,
            KeyColor::Black,
            KeyColor::White,
            KeyColor::Black,
            KeyColor::White,
        ];
        for (key, expected) in keys.iter().zip(expected) {
            assert_eq!(key.color, expected, "note {}", key.note);
        }
    }

    #[test]
    fn test_one_octave_positions() {
        // C3 white at x=0, C#3 black centered on the first slot boundary,
        // B3 the 12th key on the last white slot
        let keys = build_keys(&one_octave());
        let key_width = one_octave().key_width;

        assert_eq!(keys[0].note, 48);
        assert_eq!(keys[0].color, KeyColor::White);
        assert_eq!(keys[0].x, 0.0);

        assert_eq!(keys[1].note, 49);
        assert_eq!(keys[1].color, KeyColor::Black);
        assert!((keys[1].x - (key_width - 0.3 * key_width)).abs() < 1e-5);

        assert_eq!(keys[11].note, 59);
        assert_eq!(keys[11].color, KeyColor::White);
        assert!((keys[11].x - 6.0 * key_width).abs() < 1e-5);
    }

    #[test]
    fn test_black_key_dimensions() {
        let config = one_octave().with_height(100.0).with_key_width(20.0);
        let keys = build_keys(&config);
        let black = keys.iter().find(|k| k.color == KeyColor::Black).unwrap();
        assert_eq!(black.width, 12.0);
        assert_eq!(black.height, 50.0);

        let white = keys.iter().find(|k| k.color == KeyColor::White).unwrap();
        assert_eq!(white.width, 20.0);
        assert_eq!(white.height, 100.0);
    }

    #[test]
    fn test_white_keys_tile_the_width() {
        let config = PianoRollConfig::default().with_octaves(2);
        let keys = build_keys(&config);
        let mut expected_x = 0.0;
        for key in keys.iter().filter(|k| k.color == KeyColor::White) {
            assert!((key.x - expected_x).abs() < 1e-5, "note {}", key.note);
            expected_x += config.key_width;
        }
        assert!((expected_x - keyboard_width(&config)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_octaves_is_empty() {
        let config = PianoRollConfig::default().with_octaves(0);
        assert!(build_keys(&config).is_empty());
        assert_eq!(keyboard_width(&config), 0.0);
    }

    #[test]
    fn test_key_color() {
        assert_eq!(key_color(48), KeyColor::White); // C
        assert_eq!(key_color(49), KeyColor::Black); // C#
        assert_eq!(key_color(52), KeyColor::White); // E
        assert_eq!(key_color(53), KeyColor::White); // F
        assert_eq!(key_color(58), KeyColor::Black); // A#
    }
}
