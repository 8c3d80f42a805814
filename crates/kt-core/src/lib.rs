//! Core types for the keytone audio-feedback engine.
//!
//! Notes, songs, tempo, pitch and duration tables, the persisted audio
//! settings, and the default jingles. Everything here is plain data and
//! works without `std` or an allocator.

#![cfg_attr(not(feature = "std"), no_std)]

mod config;
mod note;
pub mod pitch;
mod song;
pub mod songs;
mod tempo;

pub use config::AudioConfig;
pub use note::{
    Note, BREVE_DOT_NOTE, BREVE_NOTE, EIGHTH_DOT_NOTE, EIGHTH_NOTE, HALF_DOT_NOTE, HALF_NOTE,
    QUARTER_DOT_NOTE, QUARTER_NOTE, SIXTEENTH_DOT_NOTE, SIXTEENTH_NOTE, THIRTYSECOND_NOTE,
    WHOLE_DOT_NOTE, WHOLE_NOTE,
};
pub use pitch::{frequency_to_midi, midi_to_frequency, REST};
pub use song::Song;
pub use tempo::Tempo;
