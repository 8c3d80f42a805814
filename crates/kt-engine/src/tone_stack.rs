//! ToneStack: the bounded set of currently sounding frequencies.

use heapless::Vec;

/// Returned for ranks past the top of the stack, and for rests.
pub const SILENCE: f32 = 0.0;

/// What a push did to the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pushed {
    /// First tone on an empty stack: output must be started.
    Started,
    /// New tone added on top (possibly evicting the oldest).
    Added,
    /// Tone was already sounding and moved to the top.
    Promoted,
}

/// Fixed-capacity stack of unique frequencies, most recent on top.
///
/// Storage order is oldest first, so the top of the stack is the last
/// element. Frequencies are stored as absolute values.
#[derive(Clone, Debug)]
pub struct ToneStack<const N: usize> {
    tones: Vec<f32, N>,
}

impl<const N: usize> ToneStack<N> {
    const NON_ZERO: () = assert!(N > 0, "tone stack needs room for at least one tone");

    pub const fn new() -> Self {
        let () = Self::NON_ZERO;
        Self { tones: Vec::new() }
    }

    /// Put a frequency on top of the stack.
    ///
    /// A frequency that is already present is promoted instead of
    /// duplicated. When the stack is full the oldest tone is evicted.
    pub fn push(&mut self, frequency: f32) -> Pushed {
        let frequency = frequency.abs();

        if let Some(i) = self.tones.iter().rposition(|&f| f == frequency) {
            self.tones[i..].rotate_left(1);
            return Pushed::Promoted;
        }

        let was_empty = self.tones.is_empty();
        if self.tones.is_full() {
            self.tones.rotate_left(1);
            if let Some(top) = self.tones.last_mut() {
                *top = frequency;
            }
        } else {
            // Not full, cannot fail
            let _ = self.tones.push(frequency);
        }

        if was_empty {
            Pushed::Started
        } else {
            Pushed::Added
        }
    }

    /// Remove a frequency, searching from the top. Returns false if absent.
    pub fn pop(&mut self, frequency: f32) -> bool {
        let frequency = frequency.abs();
        match self.tones.iter().rposition(|&f| f == frequency) {
            Some(i) => {
                self.tones.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.tones.clear();
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Frequency at `rank` (0 = most recent), or [`SILENCE`] if out of range.
    pub fn frequency_at(&self, rank: usize) -> f32 {
        self.rotated_at(rank, 0)
    }

    /// Frequency at `rank` after rotating the stack down by `shift` places.
    ///
    /// Used for tone multiplexing: as `shift` advances, each active tone
    /// takes a turn at rank 0. Rests and out-of-range ranks are [`SILENCE`].
    pub fn rotated_at(&self, rank: usize, shift: usize) -> f32 {
        let len = self.tones.len();
        if rank >= len {
            return SILENCE;
        }
        let top = len - rank - 1;
        let index = (top + len - shift % len) % len;
        let frequency = self.tones[index];
        if frequency <= 0.0 {
            SILENCE
        } else {
            frequency
        }
    }

    /// Active frequencies, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.tones.iter().rev().copied()
    }
}

impl<const N: usize> Default for ToneStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(freqs: &[f32]) -> ToneStack<4> {
        let mut stack = ToneStack::new();
        for &f in freqs {
            stack.push(f);
        }
        stack
    }

    fn contents<const N: usize>(stack: &ToneStack<N>) -> std::vec::Vec<f32> {
        stack.iter().collect()
    }

    // === Push ===

    #[test]
    fn first_push_starts() {
        let mut stack = ToneStack::<4>::new();
        assert_eq!(stack.push(440.0), Pushed::Started);
        assert_eq!(stack.push(880.0), Pushed::Added);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn duplicate_push_promotes_without_growing() {
        let mut stack = stack_of(&[440.0, 880.0, 660.0]);
        assert_eq!(stack.push(440.0), Pushed::Promoted);
        assert_eq!(stack.len(), 3);
        assert_eq!(contents(&stack), [440.0, 660.0, 880.0]);
    }

    #[test]
    fn promoting_top_is_noop() {
        let mut stack = stack_of(&[440.0, 880.0]);
        assert_eq!(stack.push(880.0), Pushed::Promoted);
        assert_eq!(contents(&stack), [880.0, 440.0]);
    }

    #[test]
    fn negative_frequency_is_normalized() {
        let mut stack = stack_of(&[440.0]);
        assert_eq!(stack.push(-440.0), Pushed::Promoted);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.frequency_at(0), 440.0);
    }

    #[test]
    fn overflow_evicts_oldest_only() {
        let mut stack = stack_of(&[100.0, 200.0, 300.0, 400.0]);
        assert_eq!(stack.push(500.0), Pushed::Added);
        assert_eq!(stack.len(), 4);
        assert_eq!(contents(&stack), [500.0, 400.0, 300.0, 200.0]);
    }

    // === Pop ===

    #[test]
    fn pop_removes_and_compacts() {
        let mut stack = stack_of(&[100.0, 200.0, 300.0]);
        assert!(stack.pop(200.0));
        assert_eq!(contents(&stack), [300.0, 100.0]);
    }

    #[test]
    fn pop_normalizes_negative_frequency() {
        let mut stack = ToneStack::<4>::new();
        stack.push(-440.0);
        assert!(stack.pop(-440.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_missing_is_noop() {
        let mut stack = stack_of(&[100.0, 200.0]);
        assert!(!stack.pop(999.0));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut stack = ToneStack::<4>::new();
        assert!(!stack.pop(440.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut stack = stack_of(&[100.0, 200.0]);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.frequency_at(0), SILENCE);
    }

    // === Lookup ===

    #[test]
    fn rank_zero_is_most_recent() {
        let stack = stack_of(&[100.0, 200.0, 300.0]);
        assert_eq!(stack.frequency_at(0), 300.0);
        assert_eq!(stack.frequency_at(2), 100.0);
    }

    #[test]
    fn out_of_range_rank_is_silence() {
        let stack = stack_of(&[100.0]);
        assert_eq!(stack.frequency_at(1), SILENCE);
        assert_eq!(stack.frequency_at(usize::MAX), SILENCE);
    }

    #[test]
    fn rest_reads_as_silence() {
        let stack = stack_of(&[0.0]);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.frequency_at(0), SILENCE);
    }

    #[test]
    fn rotation_cycles_through_tones() {
        let stack = stack_of(&[100.0, 200.0, 300.0]);
        assert_eq!(stack.rotated_at(0, 0), 300.0);
        assert_eq!(stack.rotated_at(0, 1), 200.0);
        assert_eq!(stack.rotated_at(0, 2), 100.0);
        assert_eq!(stack.rotated_at(0, 3), 300.0);
        // wraps for lower ranks too
        assert_eq!(stack.rotated_at(2, 1), 300.0);
    }

    // === Invariants ===

    #[test]
    fn count_tracks_distinct_values() {
        // Deterministic pseudo-random push/pop run over a small value set
        let mut stack = ToneStack::<4>::new();
        let mut model: std::vec::Vec<f32> = std::vec::Vec::new();
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..2000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let value = ((seed >> 16) % 7) as f32 * 100.0;
            if seed & 1 == 0 {
                stack.push(value);
                model.retain(|&f| f != value);
                model.push(value);
                if model.len() > 4 {
                    model.remove(0);
                }
            } else {
                stack.pop(value);
                model.retain(|&f| f != value);
            }
            assert!(stack.len() <= stack.capacity());
            assert_eq!(stack.len(), model.len());
            let expected: std::vec::Vec<f32> = model.iter().rev().copied().collect();
            assert_eq!(contents(&stack), expected);
        }
    }
}
