//! Note-to-key registry.
//!
//! Bidirectional index between MIDI note numbers and rendered keys, plus the
//! per-key active flag. Position `p` holds note `start_note + p`, so both
//! lookup directions are a fixed offset.

use super::config::PianoRollConfig;
use super::layout::{self, KeyColor, KeyDescriptor};

/// A rendered key: its geometry plus the visual pressed state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub descriptor: KeyDescriptor,
    /// Visual pressed state. Mutated only by message routing and gestures,
    /// never by layout code after construction.
    pub active: bool,
}

/// Ordered key collection with O(1) note lookup.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    start_note: u8,
    keys: Vec<Key>,
}

impl KeyRegistry {
    /// Build the registry for a sanitized configuration.
    pub fn new(config: &PianoRollConfig) -> Self {
        let keys = layout::build_keys(config)
            .into_iter()
            .map(|descriptor| Key {
                descriptor,
                active: false,
            })
            .collect();
        Self {
            start_note: config.start_note,
            keys,
        }
    }

    fn position(&self, note: u8) -> Option<usize> {
        let position = note as isize - self.start_note as isize;
        if (0..self.keys.len() as isize).contains(&position) {
            Some(position as usize)
        } else {
            None
        }
    }

    /// Key for a note number, or `None` outside the rendered range.
    ///
    /// A miss is not an error: inbound MIDI traffic commonly spans a wider
    /// range than the keyboard, and callers treat it as a silent no-op.
    pub fn key_for_note(&self, note: u8) -> Option<&Key> {
        self.position(note).map(|p| &self.keys[p])
    }

    /// Mutable key lookup, same range semantics as [`Self::key_for_note`].
    pub fn key_for_note_mut(&mut self, note: u8) -> Option<&mut Key> {
        self.position(note).map(move |p| &mut self.keys[p])
    }

    /// Note number held at a registry position (the reverse mapping).
    pub fn note_at(&self, position: usize) -> Option<u8> {
        if position < self.keys.len() {
            Some(self.start_note + position as u8)
        } else {
            None
        }
    }

    /// Set a key's active flag. Returns whether a key was found; setting an
    /// already-active key active again is a no-op on observable state.
    pub fn set_active(&mut self, note: u8, active: bool) -> bool {
        match self.key_for_note_mut(note) {
            Some(key) => {
                key.active = active;
                true
            }
            None => false,
        }
    }

    /// Whether the key for a note is active. Out-of-range notes are inactive.
    pub fn is_active(&self, note: u8) -> bool {
        self.key_for_note(note).is_some_and(|key| key.active)
    }

    /// Deactivate every key.
    pub fn clear_active(&mut self) {
        for key in &mut self.keys {
            key.active = false;
        }
    }

    /// All keys in note order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// White keys in note order.
    pub fn white_keys(&self) -> impl Iterator<Item = &Key> {
        self.keys
            .iter()
            .filter(|key| key.descriptor.color == KeyColor::White)
    }

    /// Black keys in note order.
    pub fn black_keys(&self) -> impl Iterator<Item = &Key> {
        self.keys
            .iter()
            .filter(|key| key.descriptor.color == KeyColor::Black)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of white keys.
    pub fn white_key_count(&self) -> usize {
        self.white_keys().count()
    }

    /// First rendered note.
    pub fn start_note(&self) -> u8 {
        self.start_note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> KeyRegistry {
        KeyRegistry::new(&PianoRollConfig::default())
    }

    #[test]
    fn test_registry_counts() {
        let registry = registry();
        assert_eq!(registry.len(), 24);
        assert_eq!(registry.white_key_count(), 14);
        assert_eq!(registry.black_keys().count(), 10);
    }

    #[test]
    fn test_note_round_trip() {
        let registry = registry();
        for note in 48..72u8 {
            let key = registry.key_for_note(note).unwrap();
            assert_eq!(key.descriptor.note, note);
        }
    }

    #[test]
    fn test_position_round_trip() {
        let registry = registry();
        for position in 0..registry.len() {
            let note = registry.note_at(position).unwrap();
            let key = registry.key_for_note(note).unwrap();
            assert_eq!(key.descriptor.note, note);
        }
        assert_eq!(registry.note_at(registry.len()), None);
    }

    #[test]
    fn test_out_of_range_lookup_is_absent() {
        let registry = registry();
        assert!(registry.key_for_note(47).is_none());
        assert!(registry.key_for_note(72).is_none());
        assert!(registry.key_for_note(127).is_none());
    }

    #[test]
    fn test_set_active() {
        let mut registry = registry();
        assert!(!registry.is_active(60));

        assert!(registry.set_active(60, true));
        assert!(registry.is_active(60));

        // Idempotent set
        assert!(registry.set_active(60, true));
        assert!(registry.is_active(60));

        assert!(registry.set_active(60, false));
        assert!(!registry.is_active(60));
    }

    #[test]
    fn test_set_active_out_of_range() {
        let mut registry = registry();
        assert!(!registry.set_active(20, true));
        assert!(!registry.is_active(20));
        assert!(registry.keys().iter().all(|key| !key.active));
    }

    #[test]
    fn test_clear_active() {
        let mut registry = registry();
        registry.set_active(50, true);
        registry.set_active(65, true);
        registry.clear_active();
        assert!(registry.keys().iter().all(|key| !key.active));
    }

    #[test]
    fn test_empty_registry() {
        let registry = KeyRegistry::new(&PianoRollConfig::default().with_octaves(0));
        assert!(registry.is_empty());
        assert!(registry.key_for_note(48).is_none());
        assert_eq!(registry.note_at(0), None);
    }
}
