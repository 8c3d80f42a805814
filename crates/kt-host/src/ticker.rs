//! Timer thread standing in for the hardware timer interrupt.

use kt_engine::{AudioDriver, ConfigStore, SharedEngine, Voice};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::cpal_driver::ToneOutput;

/// Advance calls per second. One call is one elapsed-time unit.
pub const TICK_RATE_HZ: u32 = 64;

/// Calls [`SharedEngine::advance`] on a fixed period and publishes the
/// rank-0 processed frequency to a [`ToneOutput`] whenever it changes.
pub struct Ticker {
    stop_signal: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Tick at [`TICK_RATE_HZ`].
    pub fn spawn<D, S, V, const N: usize>(
        engine: Arc<SharedEngine<'static, D, S, V, N>>,
        output: Arc<ToneOutput>,
    ) -> Self
    where
        D: AudioDriver + Send + 'static,
        S: ConfigStore + Send + 'static,
        V: Voice + Send + 'static,
    {
        let period = Duration::from_secs(1) / TICK_RATE_HZ;
        Self::spawn_with_period(engine, output, period)
    }

    pub fn spawn_with_period<D, S, V, const N: usize>(
        engine: Arc<SharedEngine<'static, D, S, V, N>>,
        output: Arc<ToneOutput>,
        period: Duration,
    ) -> Self
    where
        D: AudioDriver + Send + 'static,
        S: ConfigStore + Send + 'static,
        V: Voice + Send + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop = stop_signal.clone();

        let thread = std::thread::spawn(move || {
            tick_loop(&engine, &output, period, &stop);
        });

        Self {
            stop_signal,
            thread: Some(thread),
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking and wait for the thread.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick_loop<D, S, V, const N: usize>(
    engine: &SharedEngine<'static, D, S, V, N>,
    output: &ToneOutput,
    period: Duration,
    stop: &AtomicBool,
) where
    D: AudioDriver,
    S: ConfigStore,
    V: Voice,
{
    debug!("ticker started, period {:?}", period);
    let mut refresh = false;
    while !stop.load(Ordering::Relaxed) {
        refresh |= engine.advance(1, 1.0);
        if refresh {
            // Retried next tick if the main context holds the engine
            if let Some(frequency) = engine.try_processed_frequency(0) {
                output.set_frequency(frequency);
                refresh = false;
            }
        }
        std::thread::sleep(period);
    }
    debug!("ticker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpal_driver::CpalDriver;
    use kt_core::{Note, EIGHTH_NOTE};
    use kt_engine::{AudioEngine, Jingles, NoStore, PlainVoice};
    use std::time::Instant;

    static SONG: [Note; 2] = [Note::new(440.0, EIGHTH_NOTE), Note::new(660.0, EIGHTH_NOTE)];

    fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if done() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        done()
    }

    #[test]
    fn plays_melody_to_completion() {
        let output = Arc::new(ToneOutput::new());
        let engine = AudioEngine::new(CpalDriver::new(output.clone()), NoStore, PlainVoice)
            .with_jingles(Jingles::SILENT);
        let shared = Arc::new(SharedEngine::new(engine));
        shared.with(|e| e.play_melody(&SONG, false));
        assert!(output.is_running());

        let mut ticker =
            Ticker::spawn_with_period(shared.clone(), output.clone(), Duration::from_millis(1));
        assert!(wait_until(Duration::from_secs(5), || {
            !shared.with(|e| e.is_playing_melody())
        }));
        ticker.stop();
        assert!(!ticker.is_running());

        assert!(!output.is_running());
        assert_eq!(output.frequency(), 0.0);
        assert!(shared.with(|e| e.clock()) >= 8);
    }

    #[test]
    fn publishes_new_tones() {
        let output = Arc::new(ToneOutput::new());
        let engine = AudioEngine::new(CpalDriver::new(output.clone()), NoStore, PlainVoice)
            .with_jingles(Jingles::SILENT);
        let shared = Arc::new(SharedEngine::new(engine));

        let _ticker =
            Ticker::spawn_with_period(shared.clone(), output.clone(), Duration::from_millis(1));
        shared.with(|e| e.play_tone(523.25));
        assert!(wait_until(Duration::from_secs(5), || output.frequency() == 523.25));
    }
}
