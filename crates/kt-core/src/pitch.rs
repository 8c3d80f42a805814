//! Equal-temperament pitch table.
//!
//! Named constants cover octaves 3 through 7 (A4 = 440 Hz), which is the
//! useful range for a piezo or small speaker. Anything else can be computed
//! with [`midi_to_frequency`].

/// Frequency used for rests. Any frequency `<= 0.0` is silent.
pub const REST: f32 = 0.0;

/// MIDI note number of the 440 Hz reference pitch.
const A4_MIDI: f32 = 69.0;

// Octave 3
pub const C3: f32 = 130.81;
pub const CS3: f32 = 138.59;
pub const D3: f32 = 146.83;
pub const DS3: f32 = 155.56;
pub const E3: f32 = 164.81;
pub const F3: f32 = 174.61;
pub const FS3: f32 = 185.00;
pub const G3: f32 = 196.00;
pub const GS3: f32 = 207.65;
pub const A3: f32 = 220.00;
pub const AS3: f32 = 233.08;
pub const B3: f32 = 246.94;

// Octave 4
pub const C4: f32 = 261.63;
pub const CS4: f32 = 277.18;
pub const D4: f32 = 293.66;
pub const DS4: f32 = 311.13;
pub const E4: f32 = 329.63;
pub const F4: f32 = 349.23;
pub const FS4: f32 = 369.99;
pub const G4: f32 = 392.00;
pub const GS4: f32 = 415.30;
pub const A4: f32 = 440.00;
pub const AS4: f32 = 466.16;
pub const B4: f32 = 493.88;

// Octave 5
pub const C5: f32 = 523.25;
pub const CS5: f32 = 554.37;
pub const D5: f32 = 587.33;
pub const DS5: f32 = 622.25;
pub const E5: f32 = 659.26;
pub const F5: f32 = 698.46;
pub const FS5: f32 = 739.99;
pub const G5: f32 = 783.99;
pub const GS5: f32 = 830.61;
pub const A5: f32 = 880.00;
pub const AS5: f32 = 932.33;
pub const B5: f32 = 987.77;

// Octave 6
pub const C6: f32 = 1046.50;
pub const CS6: f32 = 1108.73;
pub const D6: f32 = 1174.66;
pub const DS6: f32 = 1244.51;
pub const E6: f32 = 1318.51;
pub const F6: f32 = 1396.91;
pub const FS6: f32 = 1479.98;
pub const G6: f32 = 1567.98;
pub const GS6: f32 = 1661.22;
pub const A6: f32 = 1760.00;
pub const AS6: f32 = 1864.66;
pub const B6: f32 = 1975.53;

// Octave 7
pub const C7: f32 = 2093.00;
pub const CS7: f32 = 2217.46;
pub const D7: f32 = 2349.32;
pub const DS7: f32 = 2489.02;
pub const E7: f32 = 2637.02;
pub const F7: f32 = 2793.83;
pub const FS7: f32 = 2959.96;
pub const G7: f32 = 3135.96;
pub const GS7: f32 = 3322.44;
pub const A7: f32 = 3520.00;
pub const AS7: f32 = 3729.31;
pub const B7: f32 = 3951.07;

/// Convert a MIDI note number to a frequency in Hz (12-TET, A4 = 440 Hz).
pub fn midi_to_frequency(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (note as f32 - A4_MIDI) / 12.0)
}

/// Nearest MIDI note number for a frequency, or `None` for rests and
/// frequencies outside the MIDI range.
pub fn frequency_to_midi(frequency: f32) -> Option<u8> {
    if frequency <= 0.0 {
        return None;
    }
    let note = libm::roundf(A4_MIDI + 12.0 * libm::log2f(frequency / 440.0));
    if (0.0..=127.0).contains(&note) {
        Some(note as u8)
    } else {
        None
    }
}
