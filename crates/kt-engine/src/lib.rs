//! Audio-feedback engine for keyboards.
//!
//! Tracks the tones currently sounding, steps melodies forward as time
//! passes, and reports the frequency a single-voice driver should emit.
//! Works without `std` or an allocator.

#![cfg_attr(not(feature = "std"), no_std)]

mod engine;
pub mod multiplex;
pub mod sequencer;
mod shared;
mod tone_stack;
mod traits;

pub use engine::{AudioEngine, Jingles, TONE_STACK_SIZE};
pub use multiplex::{Multiplexer, MAX_SIMULTANEOUS_TONES, TONE_MULTIPLEXING_RATE_DEFAULT};
pub use sequencer::{Sequencer, Transition, SHORT_REST};
pub use shared::SharedEngine;
pub use tone_stack::{Pushed, ToneStack, SILENCE};
pub use traits::{AudioDriver, ConfigStore, NoStore, PlainVoice, Voice};
