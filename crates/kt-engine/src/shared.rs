//! Engine shared between the main context and a timer interrupt.

use core::sync::atomic::{AtomicU32, Ordering};

use log::trace;
use spin::Mutex;

use crate::engine::{AudioEngine, TONE_STACK_SIZE};
use crate::traits::{AudioDriver, ConfigStore, NoStore, PlainVoice, Voice};

/// An [`AudioEngine`] reachable from two execution contexts.
///
/// The main context takes the lock with [`with`](Self::with) for the length
/// of one API call. The timer context calls [`advance`](Self::advance),
/// which never waits: if the engine is busy the step is parked and folded
/// into the next advance that gets through.
///
/// ```ignore
/// static AUDIO: SharedEngine<'static, PwmDriver> =
///     SharedEngine::new(AudioEngine::new(PwmDriver::new(), NoStore, PlainVoice));
/// ```
pub struct SharedEngine<'a, D, S = NoStore, V = PlainVoice, const N: usize = TONE_STACK_SIZE> {
    engine: Mutex<AudioEngine<'a, D, S, V, N>>,
    deferred: AtomicU32,
}

impl<'a, D, S, V, const N: usize> SharedEngine<'a, D, S, V, N> {
    pub const fn new(engine: AudioEngine<'a, D, S, V, N>) -> Self {
        Self {
            engine: Mutex::new(engine),
            deferred: AtomicU32::new(0),
        }
    }

    /// Run `f` with exclusive access, spinning until the lock is free.
    pub fn with<R>(&self, f: impl FnOnce(&mut AudioEngine<'a, D, S, V, N>) -> R) -> R {
        f(&mut *self.engine.lock())
    }

    /// Run `f` only if the engine is free right now.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut AudioEngine<'a, D, S, V, N>) -> R) -> Option<R> {
        self.engine.try_lock().map(|mut engine| f(&mut *engine))
    }

    /// Steps parked by advances that found the engine busy.
    pub fn deferred(&self) -> u32 {
        self.deferred.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> AudioEngine<'a, D, S, V, N> {
        self.engine.into_inner()
    }
}

impl<'a, D, S, V, const N: usize> SharedEngine<'a, D, S, V, N>
where
    D: AudioDriver,
    S: ConfigStore,
    V: Voice,
{
    /// Timer-context advance. Returns false without touching the engine if
    /// it is locked; the step is then added to the next advance.
    pub fn advance(&self, step: u32, end: f32) -> bool {
        let Some(mut engine) = self.engine.try_lock() else {
            self.deferred.fetch_add(step, Ordering::Relaxed);
            trace!("engine busy, deferred {} units", step);
            return false;
        };
        let carried = self.deferred.swap(0, Ordering::Relaxed);
        engine.advance(step.wrapping_add(carried), end)
    }

    /// Frequency for the driver to emit, if the engine is free.
    pub fn try_processed_frequency(&self, rank: usize) -> Option<f32> {
        self.engine.try_lock().map(|engine| engine.processed_frequency(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Jingles;
    use kt_core::{Note, EIGHTH_NOTE};

    #[derive(Debug, Default)]
    struct Silent;

    impl AudioDriver for Silent {
        fn initialize(&mut self) {}
        fn start(&mut self) {}
        fn stop(&mut self) {}
    }

    static SONG: [Note; 2] = [Note::new(440.0, EIGHTH_NOTE), Note::new(660.0, EIGHTH_NOTE)];

    static SHARED: SharedEngine<'static, Silent> =
        SharedEngine::new(AudioEngine::new(Silent, NoStore, PlainVoice));

    fn shared() -> SharedEngine<'static, Silent> {
        let engine = AudioEngine::new(Silent, NoStore, PlainVoice).with_jingles(Jingles::SILENT);
        SharedEngine::new(engine)
    }

    #[test]
    fn usable_as_static() {
        SHARED.with(|e| e.play_tone(440.0));
        assert_eq!(SHARED.try_processed_frequency(0), Some(440.0));
        SHARED.with(|e| e.stop_all());
    }

    #[test]
    fn advance_runs_when_free() {
        let shared = shared();
        shared.with(|e| e.play_melody(&SONG, false));
        assert!(shared.advance(4, 1.0));
        assert_eq!(shared.with(|e| e.frequency(0)), 660.0);
    }

    #[test]
    fn advance_defers_while_locked() {
        let shared = shared();
        shared.with(|e| e.play_melody(&SONG, false));

        let guard = shared.engine.lock();
        assert!(!shared.advance(3, 1.0));
        assert_eq!(shared.deferred(), 3);
        drop(guard);

        // 3 deferred + 1 reaches the end of the first note
        assert!(shared.advance(1, 1.0));
        assert_eq!(shared.deferred(), 0);
        assert_eq!(shared.with(|e| e.frequency(0)), 660.0);
    }

    #[test]
    fn try_with_fails_while_locked() {
        let shared = shared();
        let guard = shared.engine.lock();
        assert!(shared.try_with(|e| e.active_tones()).is_none());
        assert!(shared.try_processed_frequency(0).is_none());
        drop(guard);
        assert_eq!(shared.try_with(|e| e.active_tones()), Some(0));
    }

    #[test]
    fn into_inner_returns_engine() {
        let shared = shared();
        shared.with(|e| e.play_tone(330.0));
        let engine = shared.into_inner();
        assert_eq!(engine.frequency(0), 330.0);
    }
}
