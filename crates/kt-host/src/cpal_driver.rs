//! CPAL-based square-wave output.
//!
//! [`ToneOutput`] is the state shared between the engine side and the audio
//! callback: a gate and the frequency to emit. [`CpalDriver`] flips the gate
//! from inside the engine, and [`ToneStream`] owns the cpal stream that reads
//! it. The stream stays on the thread that opened it.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use kt_engine::AudioDriver;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::HostError;

/// Peak level of the square wave.
pub const AMPLITUDE: f32 = 0.15;

/// Gate and frequency read by the audio callback.
#[derive(Debug, Default)]
pub struct ToneOutput {
    running: AtomicBool,
    /// f32 bits
    frequency: AtomicU32,
}

impl ToneOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    pub fn frequency(&self) -> f32 {
        f32::from_bits(self.frequency.load(Ordering::Relaxed))
    }

    pub fn set_frequency(&self, frequency: f32) {
        self.frequency.store(frequency.to_bits(), Ordering::Relaxed);
    }
}

/// Engine-side driver: opens and closes the gate on [`ToneOutput`].
#[derive(Debug, Clone)]
pub struct CpalDriver {
    output: Arc<ToneOutput>,
    initialized: bool,
}

impl CpalDriver {
    pub fn new(output: Arc<ToneOutput>) -> Self {
        Self {
            output,
            initialized: false,
        }
    }

    pub fn output(&self) -> &Arc<ToneOutput> {
        &self.output
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl AudioDriver for CpalDriver {
    fn initialize(&mut self) {
        self.initialized = true;
        self.output.set_running(false);
        self.output.set_frequency(0.0);
        debug!("tone output initialized");
    }

    fn start(&mut self) {
        self.output.set_running(true);
    }

    fn stop(&mut self) {
        self.output.set_running(false);
        self.output.set_frequency(0.0);
    }
}

/// Square-wave oscillator state for one stream.
#[derive(Debug, Clone, Copy)]
pub struct SquareWave {
    sample_rate: f32,
    /// Position within the current period, in [0, 1)
    phase: f32,
}

impl SquareWave {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            phase: 0.0,
        }
    }

    /// Fill interleaved `data` with `channels` copies of each sample.
    /// Silence (and a phase reset) when the gate is closed or the
    /// frequency is not audible.
    pub fn fill(&mut self, data: &mut [f32], channels: usize, frequency: f32, running: bool) {
        if !running || frequency <= 0.0 || channels == 0 {
            data.fill(0.0);
            self.phase = 0.0;
            return;
        }

        let increment = frequency / self.sample_rate;
        for frame in data.chunks_mut(channels) {
            let sample = if self.phase < 0.5 { AMPLITUDE } else { -AMPLITUDE };
            frame.fill(sample);
            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }
        }
    }
}

/// An open cpal output stream playing whatever [`ToneOutput`] asks for.
pub struct ToneStream {
    stream: Stream,
    sample_rate: u32,
}

impl ToneStream {
    /// Open the default output device and start the stream.
    pub fn open(output: Arc<ToneOutput>) -> Result<Self, HostError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(HostError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| HostError::DeviceInit(e.to_string()))?;
        let config: StreamConfig = config.into();
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0;

        let mut wave = SquareWave::new(sample_rate);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    wave.fill(data, channels, output.frequency(), output.is_running());
                },
                |err| error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| HostError::StreamCreate(e.to_string()))?;

        stream.play().map_err(|e| HostError::Playback(e.to_string()))?;
        info!("output stream open: {} Hz, {} channels", sample_rate, channels);

        Ok(Self {
            stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
