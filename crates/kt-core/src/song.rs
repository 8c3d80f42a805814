//! Songs: borrowed note sequences with a repeat flag.

use crate::note::Note;

/// An ordered sequence of notes, played once or looped.
///
/// The notes are borrowed, never copied. A player keeps the borrow for as
/// long as the song is playing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Song<'a> {
    pub notes: &'a [Note],
    pub repeat: bool,
}

impl<'a> Song<'a> {
    pub const fn new(notes: &'a [Note], repeat: bool) -> Self {
        Self { notes, repeat }
    }

    /// Play the notes once, then stop.
    pub const fn once(notes: &'a [Note]) -> Self {
        Self::new(notes, false)
    }

    /// Wrap back to the first note after the last one.
    pub const fn looped(notes: &'a [Note]) -> Self {
        Self::new(notes, true)
    }

    pub const fn len(&self) -> usize {
        self.notes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length in duration units (64ths of a whole note).
    pub fn total_duration(&self) -> f32 {
        self.notes.iter().map(|n| n.duration).sum()
    }
}
