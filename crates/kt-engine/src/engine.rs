//! The audio engine: tone stack, melody sequencer and settings behind one
//! playback API.

use kt_core::songs::{AUDIO_OFF_SONG, AUDIO_ON_SONG, STARTUP_SONG};
use kt_core::{AudioConfig, Note, Song, Tempo, REST};
use log::debug;

use crate::multiplex::Multiplexer;
#[cfg(feature = "tone-multiplexing")]
use crate::multiplex::TONE_MULTIPLEXING_RATE_DEFAULT;
use crate::sequencer::{Sequencer, Transition};
use crate::tone_stack::{Pushed, ToneStack, SILENCE};
use crate::traits::{AudioDriver, ConfigStore, NoStore, PlainVoice, Voice};

/// Default tone stack capacity.
pub const TONE_STACK_SIZE: usize = 8;

/// Songs played on startup and when audio is switched on or off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jingles<'a> {
    pub startup: Song<'a>,
    pub on: Song<'a>,
    pub off: Song<'a>,
}

impl Jingles<'static> {
    pub const DEFAULT: Self = Self {
        startup: Song::once(STARTUP_SONG),
        on: Song::once(AUDIO_ON_SONG),
        off: Song::once(AUDIO_OFF_SONG),
    };

    /// No jingles at all.
    pub const SILENT: Self = Self {
        startup: Song::once(&[]),
        on: Song::once(&[]),
        off: Song::once(&[]),
    };
}

impl Default for Jingles<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Keyboard audio-feedback engine.
///
/// Caller-facing operations (`play_tone`, `play_melody`, `on`, ...) run in
/// the normal execution context. The driver calls [`advance`](Self::advance)
/// on a timer and emits [`processed_frequency`](Self::processed_frequency)
/// whenever it returns true.
///
/// `'a` is the lifetime of the songs being played: a melody is borrowed,
/// never copied.
pub struct AudioEngine<'a, D, S = NoStore, V = PlainVoice, const N: usize = TONE_STACK_SIZE> {
    driver: D,
    store: S,
    voice: V,
    tones: ToneStack<N>,
    sequencer: Sequencer<'a>,
    multiplexer: Multiplexer,
    tempo: Tempo,
    config: AudioConfig,
    jingles: Jingles<'a>,
    /// Sum of every step passed to `advance` (wrapping)
    clock: u32,
    initialized: bool,
    /// Set by every tone change, cleared by the next `advance`
    state_changed: bool,
}

impl<'a, D, S, V> AudioEngine<'a, D, S, V> {
    /// Engine with the default tone stack capacity. Usable in a `static`.
    pub const fn new(driver: D, store: S, voice: V) -> Self {
        Self::new_sized(driver, store, voice)
    }
}

impl<'a, D, S, V, const N: usize> AudioEngine<'a, D, S, V, N> {
    /// Engine with a tone stack of `N` tones.
    pub const fn new_sized(driver: D, store: S, voice: V) -> Self {
        Self {
            driver,
            store,
            voice,
            tones: ToneStack::new(),
            sequencer: Sequencer::new(),
            multiplexer: Multiplexer::new(),
            tempo: Tempo::DEFAULT,
            config: AudioConfig::ENABLE,
            jingles: Jingles::DEFAULT,
            clock: 0,
            initialized: false,
            state_changed: false,
        }
    }

    /// Replace the startup and on/off jingles.
    pub fn with_jingles(mut self, jingles: Jingles<'a>) -> Self {
        self.jingles = jingles;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    pub fn voice_mut(&mut self) -> &mut V {
        &mut self.voice
    }

    pub fn sequencer(&self) -> &Sequencer<'a> {
        &self.sequencer
    }

    pub fn jingles(&self) -> &Jingles<'a> {
        &self.jingles
    }

    /// Engine clock: the wrapping sum of all advance steps.
    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // === Queries ===

    /// True while any tone is on the stack, including melody notes.
    pub fn is_playing_note(&self) -> bool {
        !self.tones.is_empty()
    }

    pub fn is_playing_melody(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn active_tones(&self) -> usize {
        self.tones.len()
    }

    /// Raw frequency at `rank` (0 = most recent), or silence.
    pub fn frequency(&self, rank: usize) -> f32 {
        self.tones.frequency_at(rank)
    }

    /// Active frequencies, most recent first.
    pub fn tones(&self) -> impl Iterator<Item = f32> + '_ {
        self.tones.iter()
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn config(&self) -> AudioConfig {
        self.config
    }

    pub fn is_on(&self) -> bool {
        self.config.is_enabled()
    }

    pub fn is_clicky_on(&self) -> bool {
        self.config.is_clicky()
    }

    // === Tempo ===

    /// Applies from the next note on; the sounding note keeps its length.
    pub fn set_tempo(&mut self, bpm: u16) {
        self.tempo = Tempo::new(bpm);
    }

    pub fn increase_tempo(&mut self, change: u16) {
        self.tempo = self.tempo.faster(change);
    }

    pub fn decrease_tempo(&mut self, change: u16) {
        self.tempo = self.tempo.slower(change);
    }
}

#[cfg(feature = "tone-multiplexing")]
impl<'a, D, S, V, const N: usize> AudioEngine<'a, D, S, V, N> {
    pub fn tone_multiplexing_rate(&self) -> f32 {
        self.multiplexer.rate()
    }

    /// Elapsed-time units per rotation step; 0 disables rotation.
    pub fn set_tone_multiplexing_rate(&mut self, rate: f32) {
        self.multiplexer.set_rate(rate);
    }

    pub fn enable_tone_multiplexing(&mut self) {
        self.multiplexer.set_rate(TONE_MULTIPLEXING_RATE_DEFAULT);
    }

    pub fn disable_tone_multiplexing(&mut self) {
        self.multiplexer.set_rate(0.0);
    }

    pub fn increase_tone_multiplexing_rate(&mut self, factor: f32) {
        self.multiplexer.set_rate(self.multiplexer.rate() * factor);
    }

    /// A zero factor is ignored.
    pub fn decrease_tone_multiplexing_rate(&mut self, factor: f32) {
        if factor != 0.0 {
            self.multiplexer.set_rate(self.multiplexer.rate() / factor);
        }
    }
}

impl<'a, D, S, V, const N: usize> AudioEngine<'a, D, S, V, N>
where
    D: AudioDriver,
    S: ConfigStore,
    V: Voice,
{
    // === Lifecycle ===

    /// Load settings and set up the driver. Plays the startup jingle if
    /// audio is enabled. Later calls do nothing.
    pub fn init(&mut self) {
        if self.ensure_initialized() && self.config.is_enabled() {
            let startup = self.jingles.startup;
            self.start_song(startup.notes, startup.repeat);
        }
    }

    /// The hardware half of `init`, without the jingle. Returns true if
    /// this call did the work.
    fn ensure_initialized(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.config = match self.store.load() {
            Some(raw) => AudioConfig::from_raw(raw),
            None => AudioConfig::default(),
        };
        self.driver.initialize();
        debug!("audio initialized, config {:#04x}", self.config.raw());
        true
    }

    /// Enable audio, persist, and play the on-jingle.
    pub fn on(&mut self) {
        self.ensure_initialized();
        self.config.insert(AudioConfig::ENABLE);
        self.persist();
        debug!("audio on");
        let on = self.jingles.on;
        self.start_song(on.notes, on.repeat);
    }

    /// Silence everything, disable audio, persist, then play the
    /// off-jingle. The jingle runs to completion even though caller sound
    /// is now gated.
    pub fn off(&mut self) {
        self.ensure_initialized();
        self.stop_all();
        self.config.remove(AudioConfig::ENABLE);
        self.persist();
        debug!("audio off");
        let off = self.jingles.off;
        self.start_song(off.notes, off.repeat);
    }

    pub fn toggle(&mut self) {
        self.ensure_initialized();
        if self.config.is_enabled() {
            self.off();
        } else {
            self.on();
        }
    }

    pub fn clicky_on(&mut self) {
        self.set_clicky(true);
    }

    pub fn clicky_off(&mut self) {
        self.set_clicky(false);
    }

    pub fn clicky_toggle(&mut self) {
        self.ensure_initialized();
        self.set_clicky(!self.config.is_clicky());
    }

    fn set_clicky(&mut self, clicky: bool) {
        self.ensure_initialized();
        self.config.set(AudioConfig::CLICKY, clicky);
        self.persist();
    }

    fn persist(&mut self) {
        self.store.store(self.config.raw());
    }

    // === Playback ===

    /// Start a tone on top of whatever is sounding. Ignored while audio is
    /// off.
    pub fn play_tone(&mut self, frequency: f32) {
        self.ensure_initialized();
        if !self.config.is_enabled() {
            return;
        }
        self.push_tone(frequency);
    }

    /// Stop one tone. Unknown frequencies are ignored.
    pub fn stop_tone(&mut self, frequency: f32) {
        self.ensure_initialized();
        self.pop_tone(frequency);
    }

    /// Stop every tone and any melody. Always stops the driver.
    pub fn stop_all(&mut self) {
        self.ensure_initialized();
        self.sequencer.stop();
        self.tones.clear();
        self.multiplexer.clamp_to(0);
        self.state_changed = true;
        self.driver.stop();
    }

    /// Play a melody, replacing whatever is sounding. Ignored while audio
    /// is off, and for an empty melody.
    pub fn play_melody(&mut self, notes: &'a [Note], repeat: bool) {
        self.ensure_initialized();
        if !self.config.is_enabled() {
            return;
        }
        self.start_song(notes, repeat);
    }

    pub fn play_song(&mut self, song: &Song<'a>) {
        self.play_melody(song.notes, song.repeat);
    }

    /// Short click: `frequency` for `duration_ms`, after `delay_ms` of
    /// silence. Millisecond lengths are converted at the current tempo.
    pub fn play_click(&mut self, delay_ms: u16, frequency: f32, duration_ms: u16) {
        self.ensure_initialized();
        if !self.config.is_enabled() {
            return;
        }

        let tone = Note::new(frequency, self.tempo.ms_to_duration(duration_ms));
        let (notes, len) = if delay_ms == 0 {
            ([tone, Note::rest(0.0)], 1)
        } else {
            ([Note::rest(self.tempo.ms_to_duration(delay_ms)), tone], 2)
        };

        self.interrupt();
        let first = self.sequencer.start_click(notes, len, self.tempo);
        if let Some(first) = first {
            self.push_tone(first);
        }
    }

    /// Move playback forward by `step` elapsed-time units. Returns true
    /// when the driver should refresh its output frequency.
    ///
    /// `end` is the fraction of a note's length after which the next note
    /// starts; 1.0 plays notes to their full length.
    pub fn advance(&mut self, step: u32, end: f32) -> bool {
        self.clock = self.clock.wrapping_add(step);

        let transition = self.sequencer.advance(step, end, self.tempo);
        if let Some(transition) = transition {
            self.apply(transition);
        }

        let active = self.tones.len();
        self.multiplexer.update(self.clock, active);

        let changed = core::mem::take(&mut self.state_changed);
        let rotating = active > 0 && (self.multiplexer.is_enabled() || self.voice.is_modulating());
        transition.is_some() || changed || rotating
    }

    /// Frequency to emit for `rank`, after multiplexing rotation and the
    /// voice hook. Rests and empty ranks are silence.
    pub fn processed_frequency(&self, rank: usize) -> f32 {
        let frequency = self.tones.rotated_at(rank, self.multiplexer.shift());
        if frequency <= 0.0 {
            return SILENCE;
        }
        self.voice.process(frequency, self.clock)
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Finished { last } => {
                self.pop_tone(last);
                debug!("melody finished");
            }
            Transition::Rest { previous } => {
                self.push_tone(REST);
                self.pop_tone(previous);
            }
            Transition::Next { previous, next } => {
                // Start the next tone first so the stack never runs empty
                self.push_tone(next);
                if previous != next {
                    self.pop_tone(previous);
                }
            }
        }
    }

    /// Melodies and clicks replace anything already sounding.
    fn interrupt(&mut self) {
        if !self.tones.is_empty() || self.sequencer.is_playing() {
            self.stop_all();
        }
    }

    /// Internal melody start, not gated on the enable flag.
    fn start_song(&mut self, notes: &'a [Note], repeat: bool) {
        if notes.is_empty() {
            return;
        }
        self.interrupt();
        if let Some(first) = self.sequencer.start(notes, repeat, self.tempo) {
            debug!("melody start: {} notes, repeat {}", notes.len(), repeat);
            self.push_tone(first);
        }
    }

    fn push_tone(&mut self, frequency: f32) {
        if self.tones.push(frequency) == Pushed::Started {
            self.driver.start();
        }
        self.state_changed = true;
        self.voice.note_started(self.clock);
    }

    fn pop_tone(&mut self, frequency: f32) {
        if !self.tones.pop(frequency) {
            return;
        }
        self.state_changed = true;
        self.multiplexer.clamp_to(self.tones.len());
        if self.tones.is_empty() {
            self.driver.stop();
        }
    }
}

impl<'a, D: Default, S: Default, V: Default, const N: usize> Default for AudioEngine<'a, D, S, V, N> {
    fn default() -> Self {
        Self::new_sized(D::default(), S::default(), V::default())
    }
}
