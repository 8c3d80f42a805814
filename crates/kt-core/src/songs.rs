//! Built-in jingles.
//!
//! Played by the engine on startup and when audio is switched on or off.
//! Boards that want different sounds pass their own songs to the engine.

use crate::note::{EIGHTH_DOT_NOTE, EIGHTH_NOTE, HALF_DOT_NOTE, QUARTER_NOTE, SIXTEENTH_NOTE};
use crate::pitch::{A5, A6, C6, E6, E7, G6};
use crate::Note;

pub const STARTUP_SONG: &[Note] = &[
    Note::new(E6, EIGHTH_NOTE),
    Note::new(A6, EIGHTH_NOTE),
    Note::new(E7, EIGHTH_DOT_NOTE),
];

pub const AUDIO_ON_SONG: &[Note] = &[
    Note::new(A5, EIGHTH_NOTE),
    Note::new(A6, HALF_DOT_NOTE),
];

pub const AUDIO_OFF_SONG: &[Note] = &[
    Note::new(A6, EIGHTH_NOTE),
    Note::new(A5, HALF_DOT_NOTE),
];

/// Short rising arpeggio, handy for testing a speaker.
pub const SCALE_SONG: &[Note] = &[
    Note::new(C6, SIXTEENTH_NOTE),
    Note::new(E6, SIXTEENTH_NOTE),
    Note::new(G6, SIXTEENTH_NOTE),
    Note::rest(SIXTEENTH_NOTE),
    Note::new(C6, QUARTER_NOTE),
];
