//! Notes and note durations.
//!
//! Durations are expressed in 64ths of a whole note, so a quarter note is
//! 16 units. The engine converts units to elapsed time with the current
//! tempo (see [`Tempo::note_length`](crate::Tempo::note_length)).

use crate::pitch::REST;

pub const BREVE_NOTE: f32 = 128.0;
pub const WHOLE_NOTE: f32 = 64.0;
pub const HALF_NOTE: f32 = 32.0;
pub const QUARTER_NOTE: f32 = 16.0;
pub const EIGHTH_NOTE: f32 = 8.0;
pub const SIXTEENTH_NOTE: f32 = 4.0;
pub const THIRTYSECOND_NOTE: f32 = 2.0;

pub const BREVE_DOT_NOTE: f32 = BREVE_NOTE * 1.5;
pub const WHOLE_DOT_NOTE: f32 = WHOLE_NOTE * 1.5;
pub const HALF_DOT_NOTE: f32 = HALF_NOTE * 1.5;
pub const QUARTER_DOT_NOTE: f32 = QUARTER_NOTE * 1.5;
pub const EIGHTH_DOT_NOTE: f32 = EIGHTH_NOTE * 1.5;
pub const SIXTEENTH_DOT_NOTE: f32 = SIXTEENTH_NOTE * 1.5;

/// A pitch held for a duration. A frequency `<= 0.0` is a rest.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Note {
    /// Pitch in Hz
    pub frequency: f32,
    /// Length in 64ths of a whole note
    pub duration: f32,
}

impl Note {
    pub const fn new(frequency: f32, duration: f32) -> Self {
        Self { frequency, duration }
    }

    /// A silent note.
    pub const fn rest(duration: f32) -> Self {
        Self { frequency: REST, duration }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency <= 0.0
    }
}

impl From<(f32, f32)> for Note {
    fn from((frequency, duration): (f32, f32)) -> Self {
        Self::new(frequency, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_is_one_and_a_half() {
        assert_eq!(EIGHTH_DOT_NOTE, 12.0);
        assert_eq!(HALF_DOT_NOTE, 48.0);
    }

    #[test]
    fn rest_is_silent() {
        assert!(Note::rest(QUARTER_NOTE).is_rest());
        assert!(Note::new(-1.0, QUARTER_NOTE).is_rest());
        assert!(!Note::new(440.0, QUARTER_NOTE).is_rest());
    }

    #[test]
    fn from_pair() {
        let note: Note = (440.0, 8.0).into();
        assert_eq!(note, Note::new(440.0, EIGHTH_NOTE));
    }
}
