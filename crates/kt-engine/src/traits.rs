//! Collaborator traits: output driver, settings store, and voice effects.

/// Hardware side of the engine (PWM timer, DAC, or a host audio stream).
///
/// The driver is also responsible for calling
/// [`AudioEngine::advance`](crate::AudioEngine::advance) on a regular
/// cadence and emitting the frequencies the engine reports.
pub trait AudioDriver {
    /// One-time hardware setup. Called once, on engine initialization.
    fn initialize(&mut self);
    /// Begin emitting sound. Called when the first tone becomes active.
    fn start(&mut self);
    /// Silence the output. Called when the last tone stops.
    fn stop(&mut self);
}

/// Persistent storage for the one-byte audio settings.
pub trait ConfigStore {
    /// The stored byte, or `None` if nothing has been stored yet.
    fn load(&mut self) -> Option<u8>;
    fn store(&mut self, raw: u8);
}

/// No persistent storage: settings reset on every boot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStore;

impl ConfigStore for NoStore {
    fn load(&mut self) -> Option<u8> {
        None
    }

    fn store(&mut self, _raw: u8) {}
}

/// Frequency effects applied between the tone stack and the driver
/// (vibrato, glissando, envelopes).
///
/// `now` is the engine clock: the running sum of every step passed to
/// [`AudioEngine::advance`](crate::AudioEngine::advance).
pub trait Voice {
    /// Transform a raw frequency into the one to emit.
    fn process(&self, frequency: f32, now: u32) -> f32 {
        let _ = now;
        frequency
    }

    /// True while the effect moves the frequency on its own (vibrato,
    /// glissando). The engine then asks the driver to refresh every cycle.
    fn is_modulating(&self) -> bool {
        false
    }

    /// A tone was started; effects that run relative to note onset reset here.
    fn note_started(&mut self, now: u32) {
        let _ = now;
    }
}

/// Pass-through voice: frequencies are emitted unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainVoice;

impl Voice for PlainVoice {}
