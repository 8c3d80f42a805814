//! Desktop collaborators for the keytone engine.
//!
//! A cpal square-wave driver, a one-byte settings file and a timer thread,
//! so the engine can be heard and exercised off-target.

mod cpal_driver;
mod error;
mod file_store;
mod ticker;

use kt_engine::{AudioEngine, Jingles, PlainVoice, SharedEngine};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use cpal_driver::{CpalDriver, SquareWave, ToneOutput, ToneStream, AMPLITUDE};
pub use error::HostError;
pub use file_store::FileStore;
pub use ticker::{Ticker, TICK_RATE_HZ};

/// Engine type driven by [`DesktopAudio`].
pub type HostEngine = SharedEngine<'static, CpalDriver, FileStore, PlainVoice>;

/// An engine wired to the default output device, a settings file and a
/// ticker thread.
pub struct DesktopAudio {
    engine: Arc<HostEngine>,
    ticker: Ticker,
    stream: ToneStream,
}

impl DesktopAudio {
    /// Open the default output device, with settings persisted at
    /// `config_path`.
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self, HostError> {
        Self::open_with_jingles(config_path, Jingles::DEFAULT)
    }

    pub fn open_with_jingles(
        config_path: impl Into<PathBuf>,
        jingles: Jingles<'static>,
    ) -> Result<Self, HostError> {
        let output = Arc::new(ToneOutput::new());
        let stream = ToneStream::open(output.clone())?;

        let store = FileStore::new(config_path);
        info!("settings file: {}", store.path().display());
        let engine = AudioEngine::new(CpalDriver::new(output.clone()), store, PlainVoice)
            .with_jingles(jingles);
        let engine = Arc::new(SharedEngine::new(engine));
        let ticker = Ticker::spawn(engine.clone(), output);

        Ok(Self {
            engine,
            ticker,
            stream,
        })
    }

    pub fn engine(&self) -> &HostEngine {
        &self.engine
    }

    pub fn sample_rate(&self) -> u32 {
        self.stream.sample_rate()
    }

    /// Block until no melody is playing. Returns false on timeout.
    pub fn wait_for_melody(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        while self.engine.with(|e| e.is_playing_melody()) {
            if start.elapsed() >= timeout {
                return false;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        true
    }

    /// Silence everything and stop the ticker.
    pub fn close(mut self) {
        self.engine.with(|e| e.stop_all());
        self.ticker.stop();
    }
}
