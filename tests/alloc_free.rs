//! Allocation-free timer path tests.
//!
//! `AudioEngine::advance` and `processed_frequency` run in the timer
//! context and must never touch the heap. These tests drive long melodies,
//! chords and clicks through that path with allocation disabled.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use kt_core::songs::{AUDIO_OFF_SONG, SCALE_SONG, STARTUP_SONG};
use kt_core::Note;
use kt_engine::{AudioDriver, AudioEngine, Jingles, NoStore, PlainVoice, SharedEngine};

struct NullDriver;

impl AudioDriver for NullDriver {
    fn initialize(&mut self) {}
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

type Engine<'a> = AudioEngine<'a, NullDriver>;

fn engine<'a>() -> Engine<'a> {
    let mut engine = AudioEngine::new(NullDriver, NoStore, PlainVoice).with_jingles(Jingles::SILENT);
    engine.init();
    engine
}

/// Advance `steps` times, aborting on any heap allocation.
fn assert_advance_alloc_free(engine: &mut Engine<'_>, steps: usize) {
    assert_no_alloc(|| {
        for _ in 0..steps {
            if engine.advance(1, 1.0) {
                std::hint::black_box(engine.processed_frequency(0));
            }
        }
    });
}

#[test]
fn looping_scale_alloc_free() {
    let mut e = engine();
    e.play_melody(SCALE_SONG, true);
    assert_advance_alloc_free(&mut e, 10_000);
}

#[test]
fn jingles_alloc_free() {
    let mut e = engine();
    for song in [STARTUP_SONG, AUDIO_OFF_SONG] {
        e.play_melody(song, false);
        assert_advance_alloc_free(&mut e, 500);
        assert!(!e.is_playing_melody());
    }
}

#[test]
fn repeated_notes_alloc_free() {
    static SONG: [Note; 3] = [
        Note::new(440.0, 4.0),
        Note::new(440.0, 4.0),
        Note::new(440.0, 4.0),
    ];
    let mut e = engine();
    e.play_melody(&SONG, true);
    assert_advance_alloc_free(&mut e, 5_000);
}

#[test]
fn multiplexed_chord_alloc_free() {
    let mut e = engine();
    for f in [261.63, 329.63, 392.0, 493.88, 587.33] {
        e.play_tone(f);
    }
    e.set_tone_multiplexing_rate(1.0);
    assert_advance_alloc_free(&mut e, 10_000);
}

#[test]
fn click_alloc_free() {
    let mut e = engine();
    assert_no_alloc(|| {
        for _ in 0..100 {
            e.play_click(5, 2000.0, 20);
            for _ in 0..10 {
                e.advance(1, 1.0);
            }
        }
    });
}

#[test]
fn shared_advance_alloc_free() {
    let shared = SharedEngine::new(engine());
    shared.with(|e| e.play_melody(SCALE_SONG, true));
    assert_no_alloc(|| {
        for _ in 0..5_000 {
            if shared.advance(1, 1.0) {
                std::hint::black_box(shared.try_processed_frequency(0));
            }
        }
    });
}
