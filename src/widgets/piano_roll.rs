//! Piano roll widget.
//!
//! Paints the keyboard from the registry state and feeds pointer presses and
//! releases back into the component. White keys are painted first and black
//! keys after them so blacks always sit on top; hit-testing checks black
//! keys first for the same reason.

use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::keyboard::registry::Key;
use crate::keyboard::PianoRoll;

/// Visual style for the piano roll widget.
#[derive(Clone, Debug)]
pub struct PianoRollStyle {
    /// Fill of white keys when inactive.
    pub white_key_color: Color32,
    /// Fill of black keys when inactive.
    pub black_key_color: Color32,
    /// Fill of white keys when active.
    pub white_key_active: Color32,
    /// Fill of black keys when active.
    pub black_key_active: Color32,
    /// Key outline color.
    pub outline: Color32,
}

impl Default for PianoRollStyle {
    fn default() -> Self {
        Self {
            white_key_color: Color32::from_rgb(240, 240, 235), // Off-white
            black_key_color: Color32::from_rgb(30, 30, 35),    // Near-black
            white_key_active: Color32::from_rgb(100, 180, 255), // Blue tint
            black_key_active: Color32::from_rgb(80, 140, 200), // Darker blue
            outline: Color32::from_gray(120),
        }
    }
}

impl PianoRollStyle {
    /// Purple active tint, for keyboards mirroring hardware MIDI input.
    pub fn midi() -> Self {
        Self {
            white_key_active: Color32::from_rgb(180, 100, 200),
            black_key_active: Color32::from_rgb(140, 80, 160),
            ..Default::default()
        }
    }

    /// Set the active-key fill colors.
    pub fn with_active_colors(mut self, white: Color32, black: Color32) -> Self {
        self.white_key_active = white;
        self.black_key_active = black;
        self
    }
}

/// Screen rectangle of a key, given the keyboard origin.
fn key_rect(key: &Key, origin: Pos2) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + key.descriptor.x, origin.y),
        Vec2::new(key.descriptor.width, key.descriptor.height),
    )
}

/// Note under a pointer position, if any.
///
/// Black keys are tested first since they render on top of the whites they
/// overlap.
fn hit_test(roll: &PianoRoll, origin: Pos2, pos: Pos2) -> Option<u8> {
    for key in roll.registry().black_keys() {
        if key_rect(key, origin).contains(pos) {
            return Some(key.descriptor.note);
        }
    }
    for key in roll.registry().white_keys() {
        if key_rect(key, origin).contains(pos) {
            return Some(key.descriptor.note);
        }
    }
    None
}

/// Show the keyboard and translate pointer gestures into key presses.
///
/// A press whose position lands on a key calls [`PianoRoll::press_key`];
/// the matching release, if it also lands on a key, calls
/// [`PianoRoll::release_key`] for whichever key it landed on. Presses and
/// releases outside every key do nothing.
pub fn piano_roll(ui: &mut Ui, roll: &mut PianoRoll, style: &PianoRollStyle) -> Response {
    let (rect, response) =
        ui.allocate_exact_size(Vec2::new(roll.width(), roll.height()), Sense::drag());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();

        for key in roll.registry().white_keys() {
            let fill = if key.active {
                style.white_key_active
            } else {
                style.white_key_color
            };
            let paint_rect = key_rect(key, rect.min);
            painter.rect_filled(paint_rect, 1.0, fill);
            painter.rect_stroke(paint_rect, 1.0, egui::Stroke::new(0.5, style.outline));
        }

        for key in roll.registry().black_keys() {
            let fill = if key.active {
                style.black_key_active
            } else {
                style.black_key_color
            };
            painter.rect_filled(key_rect(key, rect.min), 1.0, fill);
        }
    }

    if response.drag_started() {
        if let Some(pos) = ui.input(|i| i.pointer.press_origin()) {
            if let Some(note) = hit_test(roll, rect.min, pos) {
                roll.press_key(note);
            }
        }
    }

    if response.drag_stopped() {
        if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            if let Some(note) = hit_test(roll, rect.min, pos) {
                roll.release_key(note);
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::PianoRollConfig;

    fn roll() -> PianoRoll {
        // One octave from C3, 12pt white keys, 50pt tall
        PianoRoll::new(PianoRollConfig::default().with_octaves(1))
    }

    #[test]
    fn test_style_default() {
        let style = PianoRollStyle::default();
        // Blue active tint
        assert!(style.white_key_active.b() > style.white_key_active.r());
    }

    #[test]
    fn test_style_midi() {
        let style = PianoRollStyle::midi();
        // Purple active tint: red and blue both high
        assert!(style.white_key_active.r() > 150);
        assert!(style.white_key_active.b() > 150);
    }

    #[test]
    fn test_key_rect_offsets_by_origin() {
        let roll = roll();
        let key = roll.registry().key_for_note(48).unwrap();
        let rect = key_rect(key, Pos2::new(10.0, 20.0));
        assert_eq!(rect.min, Pos2::new(10.0, 20.0));
        assert_eq!(rect.size(), Vec2::new(12.0, 50.0));
    }

    #[test]
    fn test_hit_test_white_key() {
        let roll = roll();
        let origin = Pos2::ZERO;
        // Middle of the first white key, below black-key height
        assert_eq!(hit_test(&roll, origin, Pos2::new(6.0, 40.0)), Some(48));
        // Second white slot, low: D3
        assert_eq!(hit_test(&roll, origin, Pos2::new(18.0, 40.0)), Some(50));
    }

    #[test]
    fn test_hit_test_prefers_black_keys() {
        let roll = roll();
        let origin = Pos2::ZERO;
        // x=12 is the C/D boundary where C#3 straddles; y within black height
        assert_eq!(hit_test(&roll, origin, Pos2::new(12.0, 10.0)), Some(49));
        // Same x below the black key falls through to the white underneath
        assert_eq!(hit_test(&roll, origin, Pos2::new(12.2, 40.0)), Some(50));
    }

    #[test]
    fn test_hit_test_outside_keyboard() {
        let roll = roll();
        let origin = Pos2::ZERO;
        assert_eq!(hit_test(&roll, origin, Pos2::new(-1.0, 10.0)), None);
        assert_eq!(hit_test(&roll, origin, Pos2::new(6.0, 60.0)), None);
        assert_eq!(hit_test(&roll, origin, Pos2::new(200.0, 10.0)), None);
    }

    #[test]
    fn test_hit_test_respects_origin() {
        let roll = roll();
        let origin = Pos2::new(100.0, 100.0);
        assert_eq!(hit_test(&roll, origin, Pos2::new(6.0, 40.0)), None);
        assert_eq!(hit_test(&roll, origin, Pos2::new(106.0, 140.0)), Some(48));
    }
}
