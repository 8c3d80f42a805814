//! Tone multiplexing: time-sliced rotation through the active tones.
//!
//! Single-voice hardware can only emit one frequency at a time. With
//! multiplexing enabled the engine rotates which active tone is reported at
//! rank 0, so quickly alternating tones approximate a chord.
//!
//! Compiled in with the `tone-multiplexing` feature. Without it,
//! [`Multiplexer`] is a zero-sized stand-in whose offset is always 0.

/// Most tones that take part in the rotation.
pub const MAX_SIMULTANEOUS_TONES: usize = 3;

/// Elapsed-time units per rotation step.
pub const TONE_MULTIPLEXING_RATE_DEFAULT: f32 = 10.0;

#[cfg(feature = "tone-multiplexing")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Multiplexer {
    /// Elapsed time per rotation step (0 = disabled)
    rate: f32,
    /// Current rotation offset into the tone stack
    shift: usize,
}

#[cfg(feature = "tone-multiplexing")]
impl Multiplexer {
    pub const fn new() -> Self {
        Self {
            rate: TONE_MULTIPLEXING_RATE_DEFAULT,
            shift: 0,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set the rate. Non-finite or non-positive rates disable rotation.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = if rate.is_finite() && rate > 0.0 { rate } else { 0.0 };
        if self.rate == 0.0 {
            self.shift = 0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.rate > 0.0
    }

    /// Recompute the offset from the engine clock.
    pub fn update(&mut self, now: u32, active: usize) {
        let slots = MAX_SIMULTANEOUS_TONES.min(active);
        if !self.is_enabled() || slots == 0 {
            self.shift = 0;
            return;
        }
        self.shift = (now as f32 / self.rate) as usize % slots;
    }

    /// Forget an offset that no longer points at an active tone.
    pub fn clamp_to(&mut self, active: usize) {
        if self.shift >= active {
            self.shift = 0;
        }
    }

    pub fn shift(&self) -> usize {
        self.shift
    }
}

#[cfg(not(feature = "tone-multiplexing"))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Multiplexer;

#[cfg(not(feature = "tone-multiplexing"))]
impl Multiplexer {
    pub const fn new() -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn update(&mut self, _now: u32, _active: usize) {}

    pub fn clamp_to(&mut self, _active: usize) {}

    pub fn shift(&self) -> usize {
        0
    }
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}
