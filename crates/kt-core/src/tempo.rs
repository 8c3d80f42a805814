//! Tempo in beats per minute.

/// Beats per minute, never below [`Tempo::MIN`].
///
/// Converts note durations into the driver's elapsed-time units:
/// `length = duration * 60 / bpm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tempo(u16);

impl Tempo {
    /// Lowest allowed tempo. Slower tempos are clamped up to this.
    pub const MIN: Tempo = Tempo(10);
    pub const DEFAULT: Tempo = Tempo(120);

    /// Create a tempo, clamping to [`Tempo::MIN`].
    pub const fn new(bpm: u16) -> Self {
        if bpm < Self::MIN.0 {
            Self::MIN
        } else {
            Self(bpm)
        }
    }

    pub const fn bpm(self) -> u16 {
        self.0
    }

    /// Faster by `change` bpm (saturating).
    pub const fn faster(self, change: u16) -> Self {
        Self::new(self.0.saturating_add(change))
    }

    /// Slower by `change` bpm, stopping at [`Tempo::MIN`].
    pub const fn slower(self, change: u16) -> Self {
        Self::new(self.0.saturating_sub(change))
    }

    /// Elapsed-time length of a note of `duration` units.
    pub fn note_length(self, duration: f32) -> f32 {
        duration * (60.0 / self.0 as f32)
    }

    /// Duration units covering `ms` milliseconds at this tempo.
    pub fn ms_to_duration(self, ms: u16) -> f32 {
        (64.0 / 60.0) * self.0 as f32 * (ms as f32 / 1000.0)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u16> for Tempo {
    fn from(bpm: u16) -> Self {
        Self::new(bpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_minimum() {
        assert_eq!(Tempo::new(0), Tempo::MIN);
        assert_eq!(Tempo::new(9).bpm(), 10);
        assert_eq!(Tempo::new(10).bpm(), 10);
    }

    #[test]
    fn no_upper_bound() {
        assert_eq!(Tempo::new(600).bpm(), 600);
        assert_eq!(Tempo::new(u16::MAX).faster(50).bpm(), u16::MAX);
    }

    #[test]
    fn slower_stops_at_minimum() {
        assert_eq!(Tempo::new(30).slower(15).bpm(), 15);
        assert_eq!(Tempo::new(30).slower(25), Tempo::MIN);
        assert_eq!(Tempo::new(30).slower(500), Tempo::MIN);
    }

    #[test]
    fn note_length_at_default_tempo() {
        // 120 bpm: half a time unit per duration unit
        assert_eq!(Tempo::DEFAULT.note_length(8.0), 4.0);
        assert_eq!(Tempo::new(60).note_length(8.0), 8.0);
    }

    #[test]
    fn click_conversion_cancels_tempo() {
        // note_length(ms_to_duration(ms)) depends only on ms
        for bpm in [60, 120, 200] {
            let t = Tempo::new(bpm);
            let len = t.note_length(t.ms_to_duration(1500));
            assert!((len - 96.0).abs() < 1e-3, "bpm {}: {}", bpm, len);
        }
    }
}
