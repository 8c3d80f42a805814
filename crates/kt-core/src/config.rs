//! Persisted audio settings.

use bitflags::bitflags;

bitflags! {
    /// Audio settings, persisted as a single byte.
    ///
    /// `CLICKY` is stored for callers (key-click feedback) and is not
    /// interpreted by the engine.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AudioConfig: u8 {
        /// Any sound may be produced
        const ENABLE = 1 << 0;
        /// Key-click feedback requested
        const CLICKY = 1 << 1;
    }
}

impl AudioConfig {
    /// Decode a persisted byte. Unknown bits are dropped.
    pub const fn from_raw(raw: u8) -> Self {
        Self::from_bits_truncate(raw)
    }

    pub const fn raw(self) -> u8 {
        self.bits()
    }

    pub const fn is_enabled(self) -> bool {
        self.contains(Self::ENABLE)
    }

    pub const fn is_clicky(self) -> bool {
        self.contains(Self::CLICKY)
    }
}

impl Default for AudioConfig {
    /// Enabled, clicky off: used when no persistent store is available.
    fn default() -> Self {
        Self::ENABLE
    }
}
