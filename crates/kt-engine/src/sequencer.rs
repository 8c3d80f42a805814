//! Melody sequencer: steps through a song as elapsed time accumulates.
//!
//! The sequencer only tracks position. It never touches the tone stack
//! itself; instead [`Sequencer::advance`] reports a [`Transition`] and the
//! engine starts and stops the corresponding tones.

use kt_core::{Note, Tempo, REST, THIRTYSECOND_NOTE};
use log::trace;

/// Gap spliced between two successive notes of the same pitch.
pub const SHORT_REST: f32 = THIRTYSECOND_NOTE;

/// Tone changes requested by the sequencer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// The song ended. `last` is still sounding and must be stopped.
    Finished { last: f32 },
    /// A short rest starts: sound a rest, then stop `previous`.
    Rest { previous: f32 },
    /// Start `next`; stop `previous` unless it is the same frequency.
    Next { previous: f32, next: f32 },
}

#[derive(Clone, Copy, Debug)]
enum Source<'a> {
    Idle,
    Song(&'a [Note]),
    /// Clicks are built on the fly, so the sequencer holds the notes itself.
    Click { notes: [Note; 2], len: usize },
}

/// Playback cursor over one song.
#[derive(Clone, Debug)]
pub struct Sequencer<'a> {
    source: Source<'a>,
    repeat: bool,
    /// Index of the current note
    current: usize,
    /// Elapsed time into the current note
    position: f32,
    /// Elapsed-time length of the current note
    length: f32,
    /// A short rest was spliced in after the current note
    resting: bool,
    /// Frequency this sequencer last started (normalized)
    sounding: f32,
}

impl<'a> Sequencer<'a> {
    pub const fn new() -> Self {
        Self {
            source: Source::Idle,
            repeat: false,
            current: 0,
            position: 0.0,
            length: 0.0,
            resting: false,
            sounding: REST,
        }
    }

    /// Begin a song. Returns the first frequency to start, or `None` for an
    /// empty song (which leaves the sequencer idle).
    pub fn start(&mut self, notes: &'a [Note], repeat: bool, tempo: Tempo) -> Option<f32> {
        self.begin(Source::Song(notes), repeat, tempo)
    }

    /// Begin a one- or two-note click held by the sequencer itself.
    pub fn start_click(&mut self, notes: [Note; 2], len: usize, tempo: Tempo) -> Option<f32> {
        self.begin(Source::Click { notes, len: len.min(2) }, false, tempo)
    }

    fn begin(&mut self, source: Source<'a>, repeat: bool, tempo: Tempo) -> Option<f32> {
        let first = *notes_of(&source).first()?;
        self.source = source;
        self.repeat = repeat;
        self.current = 0;
        self.position = 0.0;
        self.length = tempo.note_length(first.duration);
        self.resting = false;
        self.sounding = first.frequency.abs();
        Some(self.sounding)
    }

    /// Go idle without reporting a transition.
    pub fn stop(&mut self) {
        self.source = Source::Idle;
        self.resting = false;
        self.sounding = REST;
    }

    pub fn is_playing(&self) -> bool {
        !matches!(self.source, Source::Idle)
    }

    pub fn notes(&self) -> &[Note] {
        notes_of(&self.source)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn note_length(&self) -> f32 {
        self.length
    }

    pub fn is_resting(&self) -> bool {
        self.resting
    }

    pub fn repeats(&self) -> bool {
        self.repeat
    }

    /// Advance by `step` elapsed-time units.
    ///
    /// A transition happens once the position reaches `length * end`;
    /// `end` slightly below 1.0 lets a driver hand over a little early.
    /// Overshoot is carried into the next note so a song's total length
    /// does not depend on how coarsely the driver polls.
    pub fn advance(&mut self, step: u32, end: f32, tempo: Tempo) -> Option<Transition> {
        if !self.is_playing() {
            return None;
        }

        self.position += step as f32;
        let threshold = self.length * end;
        if self.position < threshold {
            return None;
        }

        let notes = self.notes();
        let previous = notes[self.current];
        let mut next_index = self.current + 1;
        if next_index >= notes.len() {
            if !self.repeat {
                let last = self.sounding;
                self.stop();
                trace!("melody finished");
                return Some(Transition::Finished { last });
            }
            next_index = 0;
        }
        let next = notes[next_index];
        let previous_tone = self.sounding;
        self.position -= threshold;

        if !self.resting && next.frequency == previous.frequency && next.frequency != REST {
            // Keep `current` so the following transition lands on `next_index`
            self.resting = true;
            self.length = tempo.note_length(SHORT_REST);
            self.sounding = REST;
            trace!("short rest after note {}", self.current);
            return Some(Transition::Rest { previous: previous_tone });
        }

        self.resting = false;
        self.current = next_index;
        self.length = tempo.note_length(next.duration);
        self.sounding = next.frequency.abs();
        trace!("note {} at {} Hz", next_index, self.sounding);
        Some(Transition::Next {
            previous: previous_tone,
            next: self.sounding,
        })
    }
}

impl Default for Sequencer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn notes_of<'s>(source: &'s Source<'_>) -> &'s [Note] {
    match source {
        Source::Idle => &[],
        Source::Song(notes) => notes,
        Source::Click { notes, len } => &notes[..*len],
    }
}
