//! Host error type.

/// Error type for desktop audio and settings operations.
#[derive(Debug)]
pub enum HostError {
    /// No output device available
    NoDevice,
    /// Failed to query or configure the output device
    DeviceInit(String),
    /// Failed to create the output stream
    StreamCreate(String),
    /// Failed to start the stream
    Playback(String),
    /// Settings file could not be read or written
    Io(std::io::Error),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::NoDevice => write!(f, "No audio device available"),
            HostError::DeviceInit(msg) => write!(f, "Device init error: {}", msg),
            HostError::StreamCreate(msg) => write!(f, "Stream create error: {}", msg),
            HostError::Playback(msg) => write!(f, "Playback error: {}", msg),
            HostError::Io(err) => write!(f, "Settings file error: {}", err),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err)
    }
}
